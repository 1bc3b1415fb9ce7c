mod defaults;
mod loader;
mod types;
mod validation;

pub use loader::ConfigLoader;
pub use types::{Config, LoggingConfig, PlaybackConfig};
pub use validation::Validate;
