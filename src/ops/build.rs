//! Initial construction: balanced tree over `[l, r]`, built bottom-up.

use safe_bump::Idx;

use crate::node::{self, Node};
use crate::store::NodeStore;

/// Builds the subtree covering positions `[l, r]`.
///
/// `init[p - 1]` is the value of position `p`. Children are allocated before
/// their parent.
pub fn build_recursive<S: NodeStore>(store: &mut S, l: usize, r: usize, init: &[i32]) -> Idx<Node> {
    if l == r {
        return store.alloc(Node::leaf(init[l - 1]));
    }
    let mid = node::mid(l, r);
    let left = build_recursive(store, l, mid, init);
    let right = build_recursive(store, mid + 1, r, init);
    store.alloc(Node::inner(left, right))
}
