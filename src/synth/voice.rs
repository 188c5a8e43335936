use std::sync::Arc;

use crate::{
    dsp::{phase::Phase, tail_off::TailOff, wavetable::WaveTable},
    io::{converter::midi_note_to_freq, AudioBuffer},
};

/// Peak amplitude per unit of velocity, leaving headroom for polyphony.
pub const LEVEL_SCALE: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Idle,       // Available for allocation
    Sustaining, // Key held, full level
    Releasing,  // Key released, tail-off running
}

/// One note's worth of wavetable oscillator plus tail-off.
pub struct Voice {
    table: Arc<WaveTable>,
    phase: Phase,
    tail_off: TailOff,
    level: f64,
    note: Option<u8>,
    state: VoiceState,
    age: u64,
    sample_rate: f32,
}

impl Voice {
    pub fn new(table: Arc<WaveTable>, sample_rate: f32) -> Self {
        Self {
            table,
            phase: Phase::new(),
            tail_off: TailOff::new(),
            level: 0.0,
            note: None,
            state: VoiceState::Idle,
            age: 0,
            sample_rate,
        }
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }

    /// Start (or restart) a note. `velocity` is a 0.0-1.0 gain.
    pub fn start_note(&mut self, note: u8, velocity: f32, age: u64) {
        self.phase.reset();
        self.tail_off.reset();
        self.level = velocity as f64 * LEVEL_SCALE;

        let frequency = midi_note_to_freq(note);
        self.phase.set_increment(frequency, self.sample_rate as f64);

        self.note = Some(note);
        self.age = age;
        self.state = VoiceState::Sustaining;
    }

    /// Release the note, either fading out or cutting it immediately.
    pub fn stop_note(&mut self, allow_tail_off: bool) {
        if self.state == VoiceState::Idle {
            return;
        }

        if allow_tail_off {
            self.tail_off.start();
            self.state = VoiceState::Releasing;
        } else {
            self.clear_current_note();
            self.phase.reset();
        }
    }

    pub fn pitch_wheel_moved(&mut self, _value: i16) {}

    pub fn controller_moved(&mut self, _controller: u8, _value: u8) {}

    /// Add this voice's output into `out[start_sample..start_sample + num_samples]`
    /// on every channel. An idle voice leaves the buffer untouched.
    ///
    /// When a release falls silent the voice goes idle on that exact sample
    /// and the rest of the region is left alone.
    pub fn render_next_block(&mut self, out: &mut AudioBuffer, start_sample: usize, num_samples: usize) {
        if !self.is_active() {
            return;
        }

        let end = start_sample
            .saturating_add(num_samples)
            .min(out.num_samples());

        for index in start_sample..end {
            let sample = self.table.get_sample(self.phase.value() as f32) as f64;
            let current = sample * self.level * self.tail_off.gain();
            out.add_to_all_channels(index, current as f32);

            self.phase.advance();

            if self.state == VoiceState::Releasing && self.tail_off.advance() {
                self.clear_current_note();
                self.phase.clear_increment();
                break;
            }
        }
    }

    fn clear_current_note(&mut self) {
        self.state = VoiceState::Idle;
        self.note = None;
        self.tail_off.reset();
    }

    pub fn is_free(&self) -> bool {
        self.state == VoiceState::Idle
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, VoiceState::Sustaining | VoiceState::Releasing)
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    /// The note this voice is bound to, if any.
    pub fn note(&self) -> Option<u8> {
        self.note
    }

    pub fn age(&self) -> u64 {
        self.age
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    /// 0.0 unless releasing.
    pub fn tail_off(&self) -> f64 {
        self.tail_off.value()
    }

    /// Current output gain: level scaled by any running release.
    pub fn gain(&self) -> f64 {
        if self.is_active() {
            self.level * self.tail_off.gain()
        } else {
            0.0
        }
    }

    pub fn phase(&self) -> f64 {
        self.phase.value()
    }

    pub fn increment(&self) -> f64 {
        self.phase.increment()
    }
}
