//! Benchmarks for low-level DSP primitives.

mod voice;
mod wavetable;

pub use voice::bench_voice;
pub use wavetable::bench_wavetable;
