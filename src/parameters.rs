use serde::Serialize;

/// The value carried by every event of a program's pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameters {
    /// MIDI channel, `0..=15`.
    pub channel: u8,
    /// MIDI pitch, `0..=127`. Events without a pitch keep time but make no
    /// sound.
    pub pitch: Option<u8>,
    /// Fraction of the event's span during which the note is held.
    pub length: f64,
    pub mute: bool,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            channel: 0,
            pitch: None,
            length: 1.0,
            mute: false,
        }
    }
}

/// Wraps a number into the MIDI pitch range, so that 128 is 0 and -1 is 127.
pub fn wrap_pitch(pitch: f64) -> u8 {
    (pitch.trunc() as i64).rem_euclid(128) as u8
}

pub fn wrap_channel(channel: f64) -> u8 {
    (channel.trunc() as i64).rem_euclid(16) as u8
}
