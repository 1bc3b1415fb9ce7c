use tracing::warn;

use super::types::{Config, LoggingConfig, PlaybackConfig};

pub const MIN_BPM: f64 = 20.0;
pub const MAX_BPM: f64 = 400.0;

pub trait Validate {
    fn validate(&mut self);
}

impl Validate for PlaybackConfig {
    fn validate(&mut self) {
        if !(MIN_BPM..=MAX_BPM).contains(&self.bpm) {
            let bpm = if self.bpm.is_nan() {
                super::types::default_bpm()
            } else {
                self.bpm.clamp(MIN_BPM, MAX_BPM)
            };
            warn!("Invalid bpm: {}. Using: {}", self.bpm, bpm);
            self.bpm = bpm;
        }

        if !(1..=127).contains(&self.velocity) {
            let velocity = self.velocity.clamp(1, 127);
            warn!("Invalid velocity: {}. Using: {}", self.velocity, velocity);
            self.velocity = velocity;
        }

        if self.beats < 1 {
            warn!("Invalid beats: {}. Using: 1", self.beats);
            self.beats = 1;
        }
    }
}

impl Validate for LoggingConfig {
    fn validate(&mut self) {
        if self.level.trim().is_empty() {
            warn!("Invalid log level: empty string. Using default: info");
            self.level = super::types::default_level();
        }
    }
}

impl Validate for Config {
    fn validate(&mut self) {
        self.playback.validate();
        self.logging.validate();
    }
}
