//! Benchmarks for oscillator waveform generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use simple_synth::dsp::oscillator::{OscillatorBlock, OSC_2_OPTIONS};

use crate::BLOCK_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for &waveform in OSC_2_OPTIONS {
            let mut osc = OscillatorBlock::new(waveform, 440.0, 1.0, 0.0, 44_100, Some(1));
            group.bench_with_input(BenchmarkId::new(waveform.name(), size), &size, |b, _| {
                b.iter(|| {
                    osc.render(black_box(&mut buffer));
                })
            });
        }
    }

    group.finish();
}
