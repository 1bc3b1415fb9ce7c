use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::types::Config;
use super::validation::Validate;

pub struct ConfigLoader {
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Uses `gallium/config.toml` under the platform config directory.
    pub fn new() -> Result<Self> {
        let config_path = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("gallium")
            .join("config.toml");
        Ok(Self { config_path })
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    fn read_content(&self) -> Result<Option<String>> {
        if !self.config_path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&self.config_path)
            .map(Some)
            .context("Failed to read config file")
    }

    /// Parses the file as written. Nothing is validated or logged, and a
    /// file that does not parse is an error.
    pub fn read(&self) -> Result<Config> {
        match self.read_content()? {
            Some(content) => toml::from_str(&content).context("Failed to parse config file"),
            None => Ok(Config::default()),
        }
    }

    /// A missing file gives the defaults. A file that does not parse is
    /// reported and replaced by the defaults too.
    pub fn load(&self) -> Result<Config> {
        let Some(content) = self.read_content()? else {
            debug!("No config at {:?}, using defaults", self.config_path);
            return Ok(Config::default());
        };

        let mut config: Config = toml::from_str(&content).unwrap_or_else(|e| {
            warn!("Failed to parse config: {}. Using defaults.", e);
            Config::default()
        });

        config.validate();
        debug!("Loaded config from {:?}", self.config_path);
        Ok(config)
    }
}
