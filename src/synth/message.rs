use std::collections::VecDeque;

#[cfg(feature = "rtrb")]
use rtrb::Consumer;

/// Control events delivered to the synth ahead of each render block.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SynthMessage {
    /// `velocity` is a 0.0-1.0 gain.
    NoteOn { note: u8, velocity: f32 },
    NoteOff { note: u8, allow_tail_off: bool },
    /// Accepted and ignored.
    PitchWheel { value: i16 },
    /// Accepted and ignored.
    Controller { controller: u8, value: u8 },
    AllNotesOff { allow_tail_off: bool },
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<SynthMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<SynthMessage> {
    fn pop(&mut self) -> Option<SynthMessage> {
        Consumer::pop(self).ok()
    }
}

impl MessageReceiver for VecDeque<SynthMessage> {
    fn pop(&mut self) -> Option<SynthMessage> {
        self.pop_front()
    }
}
