//! Gallium: a small indentation-sensitive language for rhythmic patterns.
//!
//! Programs go through [`syntax`] (a lossless concrete syntax tree),
//! [`resolver`] and [`type_checker`], and are evaluated by [`interpreter`]
//! into transformers over [`semantics::Pattern`]s. [`top_level`] ties the
//! stages together with the builtin environment, and [`playback`] turns the
//! resulting pattern into timed MIDI bytes.

pub mod config;
pub mod error;
pub mod interpreter;
pub mod parameters;
pub mod playback;
pub mod protocol;
pub mod resolver;
pub mod semantics;
pub mod syntax;
pub mod term;
pub mod top_level;
pub mod type_checker;
pub mod types;

pub use error::{Error, Result};
pub use parameters::Parameters;
pub use semantics::{Event, Pattern, Transformer};
pub use top_level::{evaluate, interpret, parse_and_resolve};
