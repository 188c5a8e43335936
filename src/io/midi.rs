#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MidiEvent {
    NoteOn { channel: u8, key: u8, velocity: u8 },
    NoteOff { channel: u8, key: u8, velocity: u8 },
    ControlChange { channel: u8, controller: u8, value: u8 },
    PitchBend { channel: u8, value: i16 },
    ProgramChange { channel: u8, program: u8 },
}

impl MidiEvent {
    /// Decode one channel voice message from raw bytes.
    ///
    /// A note-on with velocity 0 is reported as a note-off, as MIDI running
    /// status senders use it that way. Pitch bend is centred on 0
    /// (-8192..=8191). Anything else, including truncated messages, is `None`.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let status = *bytes.first()?;
        let channel = status & 0x0F;
        let data = |i: usize| bytes.get(i).map(|b| b & 0x7F);

        match status & 0xF0 {
            0x80 => Some(Self::NoteOff {
                channel,
                key: data(1)?,
                velocity: data(2)?,
            }),
            0x90 => {
                let key = data(1)?;
                let velocity = data(2)?;
                if velocity == 0 {
                    Some(Self::NoteOff {
                        channel,
                        key,
                        velocity: 0,
                    })
                } else {
                    Some(Self::NoteOn {
                        channel,
                        key,
                        velocity,
                    })
                }
            }
            0xB0 => Some(Self::ControlChange {
                channel,
                controller: data(1)?,
                value: data(2)?,
            }),
            0xC0 => Some(Self::ProgramChange {
                channel,
                program: data(1)?,
            }),
            0xE0 => {
                let lsb = data(1)? as i16;
                let msb = data(2)? as i16;
                Some(Self::PitchBend {
                    channel,
                    value: ((msb << 7) | lsb) - 8192,
                })
            }
            _ => None,
        }
    }

    pub fn channel(&self) -> u8 {
        match *self {
            Self::NoteOn { channel, .. }
            | Self::NoteOff { channel, .. }
            | Self::ControlChange { channel, .. }
            | Self::PitchBend { channel, .. }
            | Self::ProgramChange { channel, .. } => channel,
        }
    }
}
