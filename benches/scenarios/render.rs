//! Benchmarks for full pipelines and note renders.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use simple_synth::{
    graph::GraphNode, EngineConfig, ParameterOverrides, SubtractiveSynth, Synth, Waveform,
};

use crate::BLOCK_SIZES;

pub fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/render");

    // One block through the whole pipeline
    for &size in BLOCK_SIZES {
        let synth = SubtractiveSynth::new(EngineConfig::default().with_block_size(size))
            .expect("valid config");
        let mut pipeline = synth.pipeline(220.0).expect("valid pipeline");
        let mut buffer = vec![0.0f32; size];

        group.bench_with_input(BenchmarkId::new("pipeline_block", size), &size, |b, _| {
            b.iter(|| pipeline.render_block(black_box(&mut buffer)))
        });
    }

    // A whole second, default parameters vs. a bright noisy patch
    let default_synth = SubtractiveSynth::default();
    group.bench_function("note_1s_default", |b| {
        b.iter(|| default_synth.get_sound_array(black_box(440.0), black_box(1.0)))
    });

    let mut noisy = SubtractiveSynth::new(EngineConfig::default().with_noise_seed(3))
        .expect("valid config");
    noisy
        .set_parameters(
            ParameterOverrides::new()
                .osc_1(Waveform::SquareH)
                .osc_2(Waveform::WhiteNoise)
                .mix(0.2)
                .cutoff(3_000.0),
        )
        .expect("valid parameters");
    group.bench_function("note_1s_squareh_noise", |b| {
        b.iter(|| noisy.get_sound_array(black_box(110.0), black_box(1.0)))
    });

    group.finish();
}
