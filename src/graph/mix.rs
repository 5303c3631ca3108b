use crate::dsp::mix::sum_in_place;
use crate::error::SynthError;
use crate::graph::node::{GraphNode, StreamFormat};

/*
Parallel Signal Summing
=======================

The Mix node advances two sources in lockstep and adds their blocks.

How it works:
1. Render source A into the output buffer
2. Render source B into a temporary buffer
3. Add B into the output, sample by sample

The blend between the sources is set by their amplitudes, not here (see
`dsp::mix`). Mix is a plain sum.

Termination:
------------
The node ends the moment either source ends: if A has no block, B is not
pulled at all; if B has no block, the half-rendered output is discarded.
Oscillators never end, so in practice a pipeline stops only because the
consumer stops pulling.

Formats:
--------
Both sources must run at the same sample rate and block size. Mix performs
no resampling or alignment, so a mismatch is refused at construction rather
than producing a meaningless sum.

Example usage:
  let format = StreamFormat::new(44_100, 512);
  let osc_1 = OscNode::new(Waveform::Sine, 440.0, 0.7, 0.0, format, None);
  let osc_2 = OscNode::new(Waveform::Sawtooth, 440.0, 0.3, 0.0, format, None);

  let mixed = osc_1.mix(osc_2)?;  // 70% sine, 30% saw
*/

pub struct Mix<A, B> {
    pub source_a: A,
    pub source_b: B,
    format: StreamFormat,
    temp_buffer: Vec<f32>,
    finished: bool,
}

impl<A: GraphNode, B: GraphNode> Mix<A, B> {
    pub fn new(source_a: A, source_b: B) -> Result<Self, SynthError> {
        let format = source_a.format();
        let other = source_b.format();
        if format != other {
            return Err(SynthError::FormatMismatch {
                left: format,
                right: other,
            });
        }

        Ok(Mix {
            source_a,
            source_b,
            format,
            temp_buffer: vec![0.0; format.block_size],
            finished: false,
        })
    }
}

impl<A: GraphNode, B: GraphNode> GraphNode for Mix<A, B> {
    fn format(&self) -> StreamFormat {
        self.format
    }

    fn render_block(&mut self, out: &mut [f32]) -> bool {
        if self.finished {
            return false;
        }

        if !self.source_a.render_block(out) {
            self.finished = true;
            return false;
        }

        let frames = &mut self.temp_buffer[..out.len()];
        frames.fill(0.0);
        if !self.source_b.render_block(frames) {
            self.finished = true;
            return false;
        }

        sum_in_place(out, frames);
        true
    }
}
