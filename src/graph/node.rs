use std::fmt;

/// Shape of the blocks a node produces.
///
/// Every stage of a pipeline must agree on both values; nodes never resample
/// or re-block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamFormat {
    pub sample_rate: u32,
    pub block_size: usize,
}

impl StreamFormat {
    pub fn new(sample_rate: u32, block_size: usize) -> Self {
        Self {
            sample_rate,
            block_size,
        }
    }

    /// Highest representable frequency in Hz.
    pub fn nyquist(&self) -> f32 {
        self.sample_rate as f32 / 2.0
    }

    /// Whole blocks that fit in `duration` seconds. Partial blocks are dropped;
    /// zero, negative and NaN durations give 0.
    pub fn blocks_in(&self, duration: f64) -> usize {
        let blocks = (self.sample_rate as f64 * duration / self.block_size as f64).floor();
        if blocks.is_finite() && blocks > 0.0 {
            blocks as usize
        } else {
            0
        }
    }
}

impl fmt::Display for StreamFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Hz / {} samples", self.sample_rate, self.block_size)
    }
}

/// Core trait for pull-based pipeline stages.
///
/// A node produces its next block only when asked. Sources fill `out`;
/// effects (the right-hand side of a `Through`) transform `out` in place.
pub trait GraphNode: Send {
    fn format(&self) -> StreamFormat;

    /// Render the next block into `out`, which is exactly
    /// `format().block_size` long.
    ///
    /// Returns `false` once the stream has ended; `out` is then unspecified
    /// and later calls keep returning `false`.
    fn render_block(&mut self, out: &mut [f32]) -> bool;
}

/// Allow boxed graph nodes to be used as graph nodes (for dynamic dispatch)
impl GraphNode for Box<dyn GraphNode> {
    fn format(&self) -> StreamFormat {
        (**self).format()
    }

    fn render_block(&mut self, out: &mut [f32]) -> bool {
        (**self).render_block(out)
    }
}
