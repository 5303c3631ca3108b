use crate::error::SynthError;
use crate::graph::node::{GraphNode, StreamFormat};

/*
Serial Signal Chain (Through)
=============================

Through connects two nodes in series, passing the output of the first (source)
into the second (effect). This is how the synth attaches its low-pass filter
to the summed oscillators:

  [osc_1] ──┐
            ├──→ (+) ──→ [low-pass] ──→ blocks
  [osc_2] ──┘

How It Works:
-------------
1. Pull the next block from the source into the output buffer
2. Pass that buffer through the effect (in-place processing)

  Source renders:  [0.5, 0.8, -0.3, 0.9, ...]
  Effect processes in-place (e.g., filter)
  Final output:    [0.4, 0.6, -0.2, 0.7, ...]  (filtered result)

If the source has no block left, the effect is not run and the chain ends.
Both nodes must agree on the stream format.
*/

pub struct Through<S, F> {
    source: S,
    filter: F,
}

impl<S: GraphNode, F: GraphNode> Through<S, F> {
    pub fn new(source: S, filter: F) -> Result<Self, SynthError> {
        let (left, right) = (source.format(), filter.format());
        if left != right {
            return Err(SynthError::FormatMismatch { left, right });
        }
        Ok(Self { source, filter })
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }
}

impl<S: GraphNode, F: GraphNode> GraphNode for Through<S, F> {
    fn format(&self) -> StreamFormat {
        self.source.format()
    }

    fn render_block(&mut self, out: &mut [f32]) -> bool {
        self.source.render_block(out) && self.filter.render_block(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{extensions::NodeExt, filter::LowPassNode, oscillator::OscNode};

    /// Doubles every sample.
    struct Gain2(StreamFormat);

    impl GraphNode for Gain2 {
        fn format(&self) -> StreamFormat {
            self.0
        }

        fn render_block(&mut self, out: &mut [f32]) -> bool {
            out.iter_mut().for_each(|s| *s *= 2.0);
            true
        }
    }

    fn format() -> StreamFormat {
        StreamFormat::new(48_000, 128)
    }

    #[test]
    fn renders_source_then_filter() {
        let mut plain = OscNode::sine(440.0, format());
        let mut node = OscNode::sine(440.0, format()).through(Gain2(format())).unwrap();

        let mut expected = vec![0.0; 128];
        let mut buffer = vec![0.0; 128];
        plain.render_block(&mut expected);
        assert!(node.render_block(&mut buffer));

        for (e, b) in expected.iter().zip(&buffer) {
            assert_eq!(e * 2.0, *b);
        }
    }

    #[test]
    fn chains_compose() {
        let mut node = OscNode::sine(440.0, format())
            .through(Gain2(format()))
            .unwrap()
            .through(LowPassNode::new(4_000.0, format()).unwrap())
            .unwrap();

        let mut buffer = vec![0.0; 128];
        assert!(node.render_block(&mut buffer));
        assert!(buffer.iter().all(|s| s.is_finite()));
        assert!(buffer.iter().any(|s| s.abs() > 1.0));
    }

    #[test]
    fn rejects_mismatched_formats() {
        let result = OscNode::sine(440.0, format())
            .through(LowPassNode::new(1_000.0, StreamFormat::new(44_100, 128)).unwrap());
        assert!(matches!(result, Err(SynthError::FormatMismatch { .. })));
    }
}
