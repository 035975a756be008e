//! Arena-backed storage (single-threaded).

use safe_bump::{Arena, Idx};

use crate::node::Node;
use crate::store::{NodeStore, StoreCheckpoint};

/// Single-threaded node pool backed by an [`Arena`].
pub struct NodeArena {
    nodes: Arena<Node>,
}

impl NodeStore for NodeArena {
    fn new() -> Self {
        let mut nodes = Arena::new();
        let sentinel = nodes.alloc(Node::SENTINEL);
        debug_assert_eq!(sentinel.into_raw(), 0);
        Self { nodes }
    }

    fn alloc(&mut self, node: Node) -> Idx<Node> {
        self.nodes.alloc(node)
    }

    fn get(&self, idx: Idx<Node>) -> &Node {
        self.nodes.get(idx)
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn checkpoint(&self) -> StoreCheckpoint {
        StoreCheckpoint {
            nodes: self.nodes.checkpoint(),
        }
    }

    fn rollback(&mut self, cp: StoreCheckpoint) {
        self.nodes.rollback(cp.nodes);
    }
}

impl Default for NodeArena {
    fn default() -> Self {
        <Self as NodeStore>::new()
    }
}
