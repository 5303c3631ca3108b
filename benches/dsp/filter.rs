//! Benchmarks for Butterworth design and zero-phase filtering.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use simple_synth::dsp::filter::TransferFunction;

use crate::BLOCK_SIZES;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    // Redesigning per block is what a filter without cached coefficients pays.
    group.bench_function("design", |b| {
        b.iter(|| TransferFunction::butterworth_lowpass(4, black_box(10_000.0), black_box(44_100.0)))
    });

    let tf = TransferFunction::butterworth_lowpass(4, 10_000.0, 44_100.0)
        .expect("valid cutoff");

    for &size in BLOCK_SIZES {
        // Generate a test signal (sawtooth-like ramp)
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();

        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("filtfilt", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                tf.filtfilt(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
