use std::cmp::Ordering;

use midi::MIDIMessage;

pub mod midi;

/// A MIDI message salted with the time, in milliseconds, it should be sent at.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedMessage {
    pub message: MIDIMessage,
    pub time: f64,
}

impl MIDIMessage {
    pub fn timed(self, time: f64) -> TimedMessage {
        TimedMessage {
            message: self,
            time,
        }
    }
}

impl TimedMessage {
    pub fn untimed(self) -> (MIDIMessage, f64) {
        (self.message, self.time)
    }
}

impl Eq for TimedMessage {}

impl Ord for TimedMessage {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time.total_cmp(&other.time)
    }
}

impl PartialOrd for TimedMessage {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
