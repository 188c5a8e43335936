//! Low-level DSP primitives used by the voices.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside voice structs. They stay focused on the per-sample
//! math; note lifecycle lives in [`crate::synth`].

/// Phase accumulator driving table lookup.
pub mod phase;
/// Exponential release multiplier applied after note-off.
pub mod tail_off;
/// Single-cycle waveform store with phase-indexed lookup.
pub mod wavetable;

pub use phase::Phase;
pub use tail_off::TailOff;
pub use wavetable::WaveTable;
