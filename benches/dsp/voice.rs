//! Benchmarks for a single voice, held and releasing.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion};
use saavy_wavetable::{
    dsp::wavetable::WaveTable,
    io::AudioBuffer,
    synth::voice::Voice,
};

use crate::BLOCK_SIZES;

pub fn bench_voice(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/voice");
    let table = Arc::new(WaveTable::sine(2048).unwrap());

    for &size in BLOCK_SIZES {
        // Mono vs stereo: the per-sample value is added to every channel
        for channels in [1, 2] {
            let mut buffer = AudioBuffer::new(channels, size);
            let mut voice = Voice::new(Arc::clone(&table), 48_000.0);
            voice.start_note(57, 1.0, 0);

            group.bench_with_input(
                BenchmarkId::new(format!("sustain_{channels}ch"), size),
                &size,
                |b, &size| {
                    b.iter(|| {
                        voice.render_next_block(black_box(&mut buffer), 0, size);
                    })
                },
            );
        }

        // Release path: restart the note every block so the tail-off branch runs
        let mut buffer = AudioBuffer::new(2, size);
        let mut voice = Voice::new(Arc::clone(&table), 48_000.0);
        group.bench_with_input(BenchmarkId::new("release", size), &size, |b, &size| {
            b.iter(|| {
                voice.start_note(57, 1.0, 0);
                voice.stop_note(true);
                voice.render_next_block(black_box(&mut buffer), 0, size);
            })
        });
    }

    group.finish();
}
