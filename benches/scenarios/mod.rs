//! Real-world scenario benchmarks.
//!
//! These render full blocks through the dispatcher with several notes held,
//! the way the audio callback drives it.

mod poly;

pub use poly::bench_poly;
