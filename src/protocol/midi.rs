const NOTE_ON_MSG: u8 = 0x90;
const NOTE_OFF_MSG: u8 = 0x80;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MIDIMessageType {
    NoteOn { note: u8, velocity: u8 },
    NoteOff { note: u8, velocity: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MIDIMessage {
    pub payload: MIDIMessageType,
    pub channel: u8,
}

impl MIDIMessage {
    pub fn note_on(channel: u8, note: u8, velocity: u8) -> Self {
        MIDIMessage {
            payload: MIDIMessageType::NoteOn { note, velocity },
            channel,
        }
    }

    /// Note-offs are always sent with a zero release velocity.
    pub fn note_off(channel: u8, note: u8) -> Self {
        MIDIMessage {
            payload: MIDIMessageType::NoteOff { note, velocity: 0 },
            channel,
        }
    }

    /// Raw wire bytes. Channel and data bytes are masked into range.
    pub fn to_bytes(&self) -> [u8; 3] {
        let channel = self.channel & 0x0F;
        match self.payload {
            MIDIMessageType::NoteOn { note, velocity } => {
                [NOTE_ON_MSG | channel, note & 0x7F, velocity & 0x7F]
            }
            MIDIMessageType::NoteOff { note, velocity } => {
                [NOTE_OFF_MSG | channel, note & 0x7F, velocity & 0x7F]
            }
        }
    }
}
