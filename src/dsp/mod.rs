//! Low-level DSP primitives used by the graph nodes.
//!
//! These stay focused on the signal math: waveform shapes, Butterworth design
//! and zero-phase filtering, block summing. Streaming, format checks and
//! pipeline wiring live in [`crate::graph`].

/// Butterworth low-pass design and forward-backward filtering.
pub mod filter;
/// Elementwise block summing.
pub mod mix;
/// Waveform shapes and the per-oscillator sample cursor.
pub mod oscillator;

pub use oscillator::Waveform;
