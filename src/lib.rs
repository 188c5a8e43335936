//! Single-table wavetable voice engine.
//!
//! A [`WaveTable`](dsp::wavetable::WaveTable) holds one cycle of a sampled
//! waveform. [`Voice`](synth::voice::Voice)s read it by phase, and the
//! [`WavetableSynth`](synth::poly::WavetableSynth) dispatcher assigns note
//! events to a fixed pool of voices and sums them into an
//! [`AudioBuffer`](io::AudioBuffer) block by block.

pub mod config;
pub mod dsp; // Table store, phase accumulator, tail-off
pub mod error;
pub mod io;
pub mod synth; // Voice management and polyphony

pub use config::SynthConfig;
pub use error::SynthError;

pub const MAX_BLOCK_SIZE: usize = 2048;
