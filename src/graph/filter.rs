use crate::dsp::filter::TransferFunction;
use crate::error::SynthError;
use crate::graph::node::{GraphNode, StreamFormat};

/// Order of the synth's low-pass filter (24 dB/octave per pass).
pub const FILTER_ORDER: usize = 4;

/// Zero-phase Butterworth low-pass applied to each block on its own.
///
/// No filter memory is carried from one block to the next: every block is
/// padded, filtered forward and backward, and trimmed in isolation. Block
/// boundaries therefore show small edge transients for signals that are not
/// constant across the boundary.
///
/// Coefficients depend only on cutoff and sample rate, so they are designed
/// once here and reused for every block.
pub struct LowPassNode {
    coefficients: TransferFunction,
    cutoff_hz: f32,
    format: StreamFormat,
}

impl LowPassNode {
    /// Fails with [`SynthError::InvalidFilter`] unless
    /// `0 < cutoff_hz < sample_rate / 2`.
    pub fn new(cutoff_hz: f32, format: StreamFormat) -> Result<Self, SynthError> {
        let coefficients = TransferFunction::butterworth_lowpass(
            FILTER_ORDER,
            cutoff_hz,
            format.sample_rate as f32,
        )?;

        tracing::trace!(
            cutoff_hz,
            b = ?coefficients.b(),
            a = ?coefficients.a(),
            "designed low-pass"
        );

        Ok(Self {
            coefficients,
            cutoff_hz,
            format,
        })
    }

    pub fn cutoff_hz(&self) -> f32 {
        self.cutoff_hz
    }

    pub fn coefficients(&self) -> &TransferFunction {
        &self.coefficients
    }
}

impl GraphNode for LowPassNode {
    fn format(&self) -> StreamFormat {
        self.format
    }

    /// Filters `out` in place.
    fn render_block(&mut self, out: &mut [f32]) -> bool {
        self.coefficients.filtfilt(out);
        true
    }
}
