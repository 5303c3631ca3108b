//! Benchmarks for DSP primitives and full note renders.
//!
//! Run with: cargo bench
//!
//! Benchmark groups:
//!   - dsp/*        Low-level primitives (oscillator, filter, mix)
//!   - scenarios/*  Complete pipelines and `get_sound_array` calls

use criterion::{criterion_group, criterion_main};

mod dsp;
mod scenarios;

/// Block sizes worth comparing; 512 is the engine default.
pub const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

criterion_group!(
    benches,
    // Low-level DSP primitives
    dsp::bench_oscillator,
    dsp::bench_filter,
    dsp::bench_mix,
    // Full pipelines
    scenarios::bench_render,
);
criterion_main!(benches);
