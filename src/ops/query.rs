//! Point lookup: descends from a version root to one leaf.

use safe_bump::Idx;

use crate::error::{Error, Result};
use crate::node::{self, Node};
use crate::store::NodeStore;

/// Reads the value at `pos` under the subtree `node_idx` covering `[l, r]`.
///
/// Never allocates. The range halves at every step, so the walk terminates
/// even on a corrupted pool.
pub fn query_iterative<S: NodeStore>(
    store: &S,
    mut node_idx: Idx<Node>,
    mut l: usize,
    mut r: usize,
    pos: usize,
) -> Result<i32> {
    loop {
        let current = store.get(node_idx);
        if l == r {
            return Ok(current.val);
        }
        let Some((left, right)) = current.children() else {
            return Err(Error::Corrupt("leaf above the bottom level"));
        };
        let mid = node::mid(l, r);
        if pos <= mid {
            node_idx = left;
            r = mid;
        } else {
            node_idx = right;
            l = mid + 1;
        }
    }
}
