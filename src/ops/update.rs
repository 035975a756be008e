//! Point update: path-copy from the root to one leaf.

use safe_bump::Idx;

use crate::error::{Error, Result};
use crate::node::{self, Node};
use crate::store::NodeStore;

/// Writes `val` at `pos` under the subtree `node_idx` covering `[l, r]`.
///
/// Returns the handle of the new subtree root. One node is allocated per
/// level on the path; every sibling is shared with the old subtree.
/// Allocation happens only after the descent has reached the leaf, so an
/// `Err` leaves the store untouched.
pub fn update_recursive<S: NodeStore>(
    store: &mut S,
    node_idx: Idx<Node>,
    l: usize,
    r: usize,
    pos: usize,
    val: i32,
) -> Result<Idx<Node>> {
    if l == r {
        return Ok(store.alloc(Node::leaf(val)));
    }
    let Some((left, right)) = store.get(node_idx).children() else {
        return Err(Error::Corrupt("leaf above the bottom level"));
    };
    let mid = node::mid(l, r);
    let new = if pos <= mid {
        let left = update_recursive(store, left, l, mid, pos, val)?;
        Node::inner(left, right)
    } else {
        let right = update_recursive(store, right, mid + 1, r, pos, val)?;
        Node::inner(left, right)
    };
    Ok(store.alloc(new))
}
