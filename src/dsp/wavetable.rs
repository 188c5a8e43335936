use std::f32::consts::TAU;

use crate::{error::SynthError, io::AudioBuffer};

/*
Wavetable Store
===============

A wavetable is one cycle of a waveform stored as a fixed run of samples.
Playing it back at a given pitch is just a matter of walking through the
table at the right speed: the oscillator phase (0.0 to 1.0) says how far
through the cycle we are, and the table maps that position to an amplitude.

    phase   0.0        0.25       0.5        0.75       1.0
            |----------|----------|----------|----------|
    index   0          1          2          3          (wraps to 0)

Lookup
------

    index = floor(phase * table_length) mod table_length

No interpolation between neighbouring samples: the lookup is a truncating
"nearest lower sample" read. It is low fidelity (small tables alias and step
audibly) but it is exact and deterministic, which is what output-compatibility
tests rely on.

The phase is clamped to [0.0, 1.0] before the multiply, and the modulo folds
phase == 1.0 back onto index 0, so no phase value can index out of bounds.

Loading
-------

The source buffer may hold many cycles (or a whole recording). Only channel 0
is read, and only the first `table_length` samples of it become the table.
If the source is shorter than the table, the remainder stays silent.
*/

/// Default number of samples in a table.
pub const DEFAULT_TABLE_LENGTH: usize = 2048;

/// Immutable single-cycle waveform, shared read-only between voices.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveTable {
    samples: Box<[f32]>,
}

impl WaveTable {
    /// Build a table of `table_length` samples from channel 0 of `source`.
    pub fn from_buffer(source: &AudioBuffer, table_length: usize) -> Result<Self, SynthError> {
        if table_length == 0 {
            return Err(SynthError::InvalidWaveform(
                "table length must be greater than zero".into(),
            ));
        }

        let channel = source
            .channel(0)
            .ok_or_else(|| SynthError::InvalidWaveform("source buffer has no channels".into()))?;
        if channel.is_empty() {
            return Err(SynthError::InvalidWaveform(
                "source buffer has no samples".into(),
            ));
        }

        let mut samples = vec![0.0; table_length];
        let copied = channel.len().min(table_length);
        samples[..copied].copy_from_slice(&channel[..copied]);

        if channel.len() < table_length {
            log::debug!(
                "waveform source has {} samples, padding table to {}",
                channel.len(),
                table_length
            );
        }

        Ok(Self {
            samples: samples.into_boxed_slice(),
        })
    }

    /// Use `samples` as the table verbatim.
    pub fn from_samples(samples: Vec<f32>) -> Result<Self, SynthError> {
        if samples.is_empty() {
            return Err(SynthError::InvalidWaveform("sample list is empty".into()));
        }
        Ok(Self {
            samples: samples.into_boxed_slice(),
        })
    }

    /// One cycle of a sine wave.
    pub fn sine(table_length: usize) -> Result<Self, SynthError> {
        Self::from_fn(table_length, |t| (t * TAU).sin())
    }

    /// Fill a table by evaluating `f` at each position `i / table_length`.
    pub fn from_fn(table_length: usize, f: impl Fn(f32) -> f32) -> Result<Self, SynthError> {
        let samples = (0..table_length)
            .map(|i| f(i as f32 / table_length as f32))
            .collect();
        Self::from_samples(samples)
    }

    /// Non-interpolated read at `phase` (clamped to [0, 1]).
    #[inline]
    pub fn get_sample(&self, phase: f32) -> f32 {
        let len = self.samples.len();
        // NaN clamps to NaN and casts to 0
        let phase = phase.clamp(0.0, 1.0);
        let index = (phase * len as f32) as usize % len;
        self.samples[index]
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false: construction rejects empty tables.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.samples
    }
}
