//! Real-world scenario benchmarks.
//!
//! Complete oscillator → mix → low-pass chains, per block and per note.

mod render;

pub use render::bench_render;
