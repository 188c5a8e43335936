#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{dsp::wavetable::DEFAULT_TABLE_LENGTH, error::SynthError};

/// Engine settings fixed before the first note.
///
/// `sample_rate` may later be changed through
/// [`WavetableSynth::prepare`](crate::synth::poly::WavetableSynth::prepare);
/// `max_voices` and `table_length` are fixed for the engine's lifetime.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthConfig {
    pub sample_rate: f32,
    pub max_voices: usize,
    pub table_length: usize,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            max_voices: 8,
            table_length: DEFAULT_TABLE_LENGTH,
        }
    }
}

impl SynthConfig {
    pub fn with_sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_max_voices(mut self, max_voices: usize) -> Self {
        self.max_voices = max_voices;
        self
    }

    pub fn with_table_length(mut self, table_length: usize) -> Self {
        self.table_length = table_length;
        self
    }

    /// Reject settings the engine cannot run with.
    pub fn validate(&self) -> Result<(), SynthError> {
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(SynthError::InvalidConfig(format!(
                "sample rate must be positive, got {}",
                self.sample_rate
            )));
        }
        if self.max_voices == 0 {
            return Err(SynthError::InvalidConfig(
                "at least one voice is required".into(),
            ));
        }
        if self.table_length == 0 {
            return Err(SynthError::InvalidConfig(
                "table length must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
