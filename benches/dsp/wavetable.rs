//! Benchmarks for phase-indexed table lookup.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_wavetable::dsp::{phase::Phase, wavetable::WaveTable};

use crate::BLOCK_SIZES;

pub fn bench_wavetable(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/wavetable");
    let table = WaveTable::sine(2048).unwrap();

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];
        let mut phase = Phase::new();
        phase.set_increment(440.0, 48_000.0);

        group.bench_with_input(BenchmarkId::new("lookup", size), &size, |b, _| {
            b.iter(|| {
                for sample in buffer.iter_mut() {
                    *sample = table.get_sample(phase.value() as f32);
                    phase.advance();
                }
                black_box(&buffer);
            })
        });
    }

    group.finish();
}
