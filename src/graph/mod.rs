//! Pull-based block streams built on the DSP primitives.
//!
//! A pipeline is a tree of nodes that each hand out one block per pull. The
//! `extensions` module adds fluent helpers so the synth can write its chain as
//! `osc_1.mix(osc_2)?.through(filter)?` and drain it as an iterator.

/// Fluent combinators (`.mix()`, `.through()`, `.blocks()`).
pub mod extensions;
/// Per-block zero-phase Butterworth low-pass.
pub mod filter;
/// Lockstep summing of two sources.
pub mod mix;
/// Core trait shared by all graph nodes.
pub mod node;
/// Unbounded waveform sources.
pub mod oscillator;
/// Serial chaining of two nodes (source → effect).
pub mod through;

pub use extensions::{Blocks, NodeExt};
pub use filter::LowPassNode;
pub use mix::Mix;
pub use node::{GraphNode, StreamFormat};
pub use oscillator::OscNode;
pub use through::Through;
