use super::types::{
    LoggingConfig, PlaybackConfig, default_beats, default_bpm, default_level, default_velocity,
};

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            bpm: default_bpm(),
            velocity: default_velocity(),
            beats: default_beats(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}
