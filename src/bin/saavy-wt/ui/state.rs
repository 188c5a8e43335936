//! Shared state types for UI communication
//!
//! Static data is handed over once at startup; per-callback updates are
//! `Copy` and allocation-free so the audio thread can send them.

use saavy_wavetable::synth::{poly::WavetableSynth, voice::VoiceState};

/// Most voices the monitor can show
pub const MAX_UI_VOICES: usize = 16;

/// Static state fixed at startup
#[derive(Clone, Debug)]
pub struct UiStateInit {
    /// Audio sample rate in Hz
    pub sample_rate: f32,
    /// Device output channels
    pub channels: usize,
    /// Name of the table shape
    pub waveform: &'static str,
    pub table_length: usize,
    pub max_voices: usize,
}

/// Snapshot of one voice
#[derive(Clone, Copy, Debug)]
pub struct VoiceSnapshot {
    pub state: VoiceState,
    pub note: Option<u8>,
    /// Current output gain (level × tail-off)
    pub gain: f32,
}

impl Default for VoiceSnapshot {
    fn default() -> Self {
        Self {
            state: VoiceState::Idle,
            note: None,
            gain: 0.0,
        }
    }
}

/// Dynamic state sent from the audio thread after every callback
#[derive(Clone, Copy, Debug)]
pub struct UiStateUpdate {
    pub voices: [VoiceSnapshot; MAX_UI_VOICES],
    pub num_voices: u8,
    pub active_voices: u8,
    pub dropped_notes: u64,
}

impl UiStateUpdate {
    pub fn new() -> Self {
        Self {
            voices: [VoiceSnapshot::default(); MAX_UI_VOICES],
            num_voices: 0,
            active_voices: 0,
            dropped_notes: 0,
        }
    }

    pub fn from_synth(synth: &WavetableSynth) -> Self {
        let mut update = Self::new();

        for (slot, voice) in update.voices.iter_mut().zip(synth.voices()) {
            *slot = VoiceSnapshot {
                state: voice.state(),
                note: voice.note(),
                gain: voice.gain() as f32,
            };
        }

        update.num_voices = synth.voices().len().min(MAX_UI_VOICES) as u8;
        update.active_voices = synth.active_voices().min(u8::MAX as usize) as u8;
        update.dropped_notes = synth.dropped_notes();
        update
    }

    /// Voices that fit on screen
    pub fn visible_voices(&self) -> &[VoiceSnapshot] {
        &self.voices[..self.num_voices as usize]
    }
}
