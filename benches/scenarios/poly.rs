//! Benchmarks for polyphonic rendering through `WavetableSynth`.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion};
use saavy_wavetable::{
    dsp::wavetable::WaveTable, io::AudioBuffer, synth::poly::WavetableSynth, SynthConfig,
};

use crate::BLOCK_SIZES;

/// Chord voicings of increasing size.
const CHORDS: &[(&str, &[u8])] = &[
    ("1_voice", &[57]),
    ("triad", &[60, 64, 67]),
    ("8_voices", &[48, 52, 55, 59, 60, 64, 67, 71]),
];

pub fn bench_poly(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/poly");
    let table = Arc::new(WaveTable::sine(2048).unwrap());
    let config = SynthConfig::default().with_max_voices(8);

    for &size in BLOCK_SIZES {
        let mut buffer = AudioBuffer::new(2, size);

        for &(name, notes) in CHORDS {
            let mut synth = WavetableSynth::new(Arc::clone(&table), &config).unwrap();
            for &note in notes {
                let _ = synth.note_on(note, 0.8);
            }

            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, &size| {
                b.iter(|| {
                    buffer.clear();
                    synth.render_block(black_box(&mut buffer), 0, size);
                })
            });
        }
    }

    group.finish();
}
