//! Computer keyboard → MIDI notes
//!
//! Two rows laid out like a piano octave:
//!
//!    w e   t y u
//!   a s d f g h j k
//!
//! `a` is C in the current octave, `k` the C above. Keys toggle: press once
//! to start a note, again to release it (terminals rarely report key-up).

use saavy_wavetable::synth::message::SynthMessage;

const KEY_LAYOUT: &[(char, u8)] = &[
    ('a', 0),
    ('w', 1),
    ('s', 2),
    ('e', 3),
    ('d', 4),
    ('f', 5),
    ('t', 6),
    ('g', 7),
    ('y', 8),
    ('h', 9),
    ('u', 10),
    ('j', 11),
    ('k', 12),
];

const MIN_OCTAVE: i8 = 0;
const MAX_OCTAVE: i8 = 9;

pub struct Keyboard {
    octave: i8,
    velocity: f32,
    held: [bool; 128],
}

impl Keyboard {
    pub fn new() -> Self {
        Self {
            octave: 4,
            velocity: 0.8,
            held: [false; 128],
        }
    }

    pub fn octave(&self) -> i8 {
        self.octave
    }

    pub fn held_notes(&self) -> impl Iterator<Item = u8> + '_ {
        self.held
            .iter()
            .enumerate()
            .filter(|(_, &held)| held)
            .map(|(note, _)| note as u8)
    }

    /// MIDI note for a key in the current octave (C4 = 60).
    pub fn note_for(&self, key: char) -> Option<u8> {
        let key = key.to_ascii_lowercase();
        let (_, offset) = KEY_LAYOUT.iter().find(|(k, _)| *k == key)?;
        let note = (self.octave as i16 + 1) * 12 + *offset as i16;
        u8::try_from(note).ok().filter(|n| *n < 128)
    }

    /// Toggle the note under `key`, returning the message to send.
    pub fn toggle(&mut self, key: char) -> Option<SynthMessage> {
        let note = self.note_for(key)?;
        let held = &mut self.held[note as usize];
        *held = !*held;

        Some(if *held {
            SynthMessage::NoteOn {
                note,
                velocity: self.velocity,
            }
        } else {
            SynthMessage::NoteOff {
                note,
                allow_tail_off: true,
            }
        })
    }

    /// Forget all held notes and return the message that releases them.
    pub fn release_all(&mut self) -> SynthMessage {
        self.held = [false; 128];
        SynthMessage::AllNotesOff {
            allow_tail_off: true,
        }
    }

    pub fn octave_down(&mut self) {
        self.octave = (self.octave - 1).max(MIN_OCTAVE);
    }

    pub fn octave_up(&mut self) {
        self.octave = (self.octave + 1).min(MAX_OCTAVE);
    }
}
