//! Shared-arena-backed storage (multi-threaded).

use safe_bump::{Idx, SharedArena};

use crate::node::Node;
use crate::store::{NodeStore, StoreCheckpoint};

/// Thread-safe node pool backed by a [`SharedArena`].
///
/// Readers of committed versions need no locking; the single writer must
/// still be serialized with them externally.
pub struct NodeArenaSync {
    nodes: SharedArena<Node>,
}

impl NodeStore for NodeArenaSync {
    fn new() -> Self {
        let mut nodes = SharedArena::new();
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

impl Default for NodeArenaSync {
    fn default() -> Self {
        <Self as NodeStore>::new()
    }
}
