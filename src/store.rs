//! Storage abstraction for the node pool.

use safe_bump::{Checkpoint, Idx};

use crate::node::Node;

/// Saved length of a node pool.
pub struct StoreCheckpoint {
    /// Nodes arena checkpoint.
    pub nodes: Checkpoint<Node>,
}

// StoreCheckpoint holds only a Checkpoint<Node> (Copy).

impl Clone for StoreCheckpoint {
    fn clone(&self) -> Self {
        *self
    }
}

impl Copy for StoreCheckpoint {}

/// Storage backend for path-copying arrays.
///
/// Abstracts over [`Arena`](safe_bump::Arena) (single-thread) and
/// [`SharedArena`](safe_bump::SharedArena) (multi-thread) backends.
/// Slot 0 always holds [`Node::SENTINEL`].
pub trait NodeStore {
    /// Creates a pool holding only the sentinel.
    fn new() -> Self
    where
        Self: Sized;

    /// Allocates a node, returning its handle.
    fn alloc(&mut self, node: Node) -> Idx<Node>;

    /// Returns the node at `idx`.
    fn get(&self, idx: Idx<Node>) -> &Node;

    /// Number of allocated nodes, sentinel included.
    fn node_count(&self) -> usize;

    /// Saves the current pool length.
    fn checkpoint(&self) -> StoreCheckpoint;

    /// Discards every node allocated after `cp`.
    fn rollback(&mut self, cp: StoreCheckpoint);
}
