//! Turns a pattern into timestamped MIDI bytes, one beat at a time.

use tracing::debug;

use crate::parameters::Parameters;
use crate::protocol::TimedMessage;
use crate::protocol::midi::MIDIMessage;
use crate::semantics::Pattern;

pub const DEFAULT_BPM: f64 = 120.0;
pub const DEFAULT_VELOCITY: u8 = 100;

/// Where MIDI bytes end up: a device connection, a log, a test recorder.
pub trait MidiSink {
    fn send(&mut self, bytes: &[u8], timestamp_ms: f64);
}

impl<S: MidiSink + ?Sized> MidiSink for &mut S {
    fn send(&mut self, bytes: &[u8], timestamp_ms: f64) {
        (**self).send(bytes, timestamp_ms)
    }
}

pub struct Playback {
    pattern: Pattern<Parameters>,
    beat: f64,
    bpm: f64,
    velocity: u8,
}

impl Playback {
    pub fn new(pattern: Pattern<Parameters>, bpm: f64, velocity: u8) -> Self {
        Playback {
            pattern,
            beat: 0.0,
            bpm,
            velocity,
        }
    }

    /// Swaps the pattern. Playback carries on from the current beat.
    pub fn set_pattern(&mut self, pattern: Pattern<Parameters>) {
        self.pattern = pattern;
    }

    pub fn beat(&self) -> f64 {
        self.beat
    }

    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    /// Length of one beat in milliseconds.
    pub fn beat_length(&self) -> f64 {
        60_000.0 / self.bpm
    }

    /// The note-on and note-off messages for the next beat, in time order,
    /// with `now_ms` standing for the start of that beat.
    pub fn messages(&self, now_ms: f64) -> Vec<TimedMessage> {
        let beat_len = self.beat_length();
        let mut messages = Vec::new();
        for event in self.pattern.query(self.beat, self.beat + 1.0) {
            let params = &event.value;
            let Some(pitch) = params.pitch else { continue };
            if params.mute {
                continue;
            }
            let on = now_ms + (event.start - self.beat) * beat_len;
            let release = event.start + (event.end - event.start) * params.length;
            let off = now_ms + (release - self.beat) * beat_len;
            messages.push(MIDIMessage::note_on(params.channel, pitch, self.velocity).timed(on));
            messages.push(MIDIMessage::note_off(params.channel, pitch).timed(off));
        }
        messages.sort();
        messages
    }

    /// Sends the next beat's messages to `sink` and moves on one beat.
    pub fn query_and_send(&mut self, now_ms: f64, mut sink: impl MidiSink) {
        let messages = self.messages(now_ms);
        debug!("Beat {}: sending {} MIDI message(s)", self.beat, messages.len());
        for timed in messages {
            let (message, time) = timed.untimed();
            sink.send(&message.to_bytes(), time);
        }
        self.beat += 1.0;
    }
}
