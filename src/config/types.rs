use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PlaybackConfig {
    #[serde(default = "default_bpm")]
    pub bpm: f64,

    #[serde(default = "default_velocity")]
    pub velocity: u8,

    /// Beats to play before stopping.
    #[serde(default = "default_beats")]
    pub beats: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

pub(super) fn default_bpm() -> f64 {
    crate::playback::DEFAULT_BPM
}

pub(super) fn default_velocity() -> u8 {
    crate::playback::DEFAULT_VELOCITY
}

pub(super) fn default_beats() -> u64 {
    16
}

pub(super) fn default_level() -> String {
    "info".to_string()
}
