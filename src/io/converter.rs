use crate::{io::midi::MidiEvent, synth::message::SynthMessage};

pub fn midi_to_synth(midi: MidiEvent, channel_filter: u8) -> Option<SynthMessage> {
    if midi.channel() != channel_filter {
        return None;
    }

    match midi {
        MidiEvent::NoteOn { key, velocity, .. } => Some(SynthMessage::NoteOn {
            note: key,
            velocity: velocity_to_gain(velocity),
        }),
        MidiEvent::NoteOff { key, .. } => Some(SynthMessage::NoteOff {
            note: key,
            allow_tail_off: true,
        }),
        MidiEvent::PitchBend { value, .. } => Some(SynthMessage::PitchWheel { value }),
        MidiEvent::ControlChange {
            controller, value, ..
        } => Some(SynthMessage::Controller { controller, value }),
        MidiEvent::ProgramChange { .. } => None,
    }
}

/// Convert MIDI note number to frequency in Hz.
/// A4 = 440 Hz = MIDI note 69
///
/// Double precision: the result feeds the `f64` phase increment directly.
pub fn midi_note_to_freq(note: u8) -> f64 {
    440.0 * 2.0_f64.powf((note as f64 - 69.0) / 12.0)
}

/// MIDI velocity (0-127) to a 0.0-1.0 gain.
pub fn velocity_to_gain(velocity: u8) -> f32 {
    velocity.min(127) as f32 / 127.0
}
