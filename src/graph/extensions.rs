use crate::error::SynthError;
use crate::graph::{mix::Mix, node::GraphNode, through::Through};

pub trait NodeExt: GraphNode + Sized {
    fn through<F: GraphNode>(self, filter: F) -> Result<Through<Self, F>, SynthError> {
        Through::new(self, filter)
    }

    fn mix<M: GraphNode>(self, source: M) -> Result<Mix<Self, M>, SynthError> {
        Mix::new(self, source)
    }

    /// Lazy iterator over owned blocks. Bound it with `take`.
    fn blocks(self) -> Blocks<Self> {
        Blocks::new(self)
    }
}

impl<T: GraphNode> NodeExt for T {}

/// Pulls one block from the node per `next()`.
pub struct Blocks<N> {
    node: N,
    done: bool,
}

impl<N: GraphNode> Blocks<N> {
    pub fn new(node: N) -> Self {
        Self { node, done: false }
    }

    pub fn into_inner(self) -> N {
        self.node
    }
}

impl<N: GraphNode> Iterator for Blocks<N> {
    type Item = Vec<f32>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut block = vec![0.0; self.node.format().block_size];
        if self.node.render_block(&mut block) {
            Some(block)
        } else {
            self.done = true;
            None
        }
    }
}
