/// Channel voice and meta events the generators can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    NoteOn { channel: u8, key: u8, velocity: u8 },
    NoteOff { channel: u8, key: u8 },
    /// Set Tempo meta event, microseconds per quarter note (24 bits).
    Tempo(u32),
    EndOfTrack,
}

/// An event stamped with its absolute tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidiEvent {
    pub tick: u32,
    pub kind: EventKind,
}

impl MidiEvent {
    pub fn note_on(tick: u32, channel: u8, key: u8, velocity: u8) -> Self {
        MidiEvent {
            tick,
            kind: EventKind::NoteOn {
                channel,
                key,
                velocity,
            },
        }
    }

    pub fn note_off(tick: u32, channel: u8, key: u8) -> Self {
        MidiEvent {
            tick,
            kind: EventKind::NoteOff { channel, key },
        }
    }

    pub fn tempo(micros_per_quarter: u32) -> Self {
        MidiEvent {
            tick: 0,
            kind: EventKind::Tempo(micros_per_quarter),
        }
    }

    pub fn end_of_track(tick: u32) -> Self {
        MidiEvent {
            tick,
            kind: EventKind::EndOfTrack,
        }
    }

    /// Status and data bytes, without the delta-time. Always a full status byte.
    pub fn bytes(&self) -> Vec<u8> {
        match self.kind {
            EventKind::NoteOn {
                channel,
                key,
                velocity,
            } => vec![0x90 | (channel & 0x0F), key & 0x7F, velocity & 0x7F],
            EventKind::NoteOff { channel, key } => vec![0x80 | (channel & 0x0F), key & 0x7F, 0x00],
            EventKind::Tempo(us) => {
                let [_, hi, mid, lo] = us.min(0x00FF_FFFF).to_be_bytes();
                vec![0xFF, 0x51, 0x03, hi, mid, lo]
            }
            EventKind::EndOfTrack => vec![0xFF, 0x2F, 0x00],
        }
    }
}
