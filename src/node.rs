//! Pool node type and wire-handle helpers.

use std::fmt;

use safe_bump::Idx;

/// Immutable node of a path-copying array.
///
/// Inner nodes have both children and `val == 0`; leaves have no children
/// and carry the stored value. A node is never modified once allocated.
#[derive(Clone, Copy)]
pub struct Node {
    /// Subtree for `[l, mid]`.
    pub left: Option<Idx<Self>>,
    /// Subtree for `[mid + 1, r]`.
    pub right: Option<Idx<Self>>,
    /// Stored value, meaningful only at leaves.
    pub val: i32,
}

impl Node {
    /// Occupies slot 0 of every pool so that handle 0 means "none".
    pub const SENTINEL: Self = Self {
        left: None,
        right: None,
        val: 0,
    };

    /// Creates a leaf holding `val`.
    #[must_use]
    pub const fn leaf(val: i32) -> Self {
        Self {
            left: None,
            right: None,
            val,
        }
    }

    /// Creates an inner node over two existing subtrees.
    #[must_use]
    pub const fn inner(left: Idx<Self>, right: Idx<Self>) -> Self {
        Self {
            left: Some(left),
            right: Some(right),
            val: 0,
        }
    }

    /// Returns both children, or `None` for a leaf.
    #[must_use]
    pub const fn children(&self) -> Option<(Idx<Self>, Idx<Self>)> {
        match (self.left, self.right) {
            (Some(l), Some(r)) => Some((l, r)),
            _ => None,
        }
    }
}

/// Split point of the range `[l, r]`; the left half is `[l, mid]`.
#[inline]
#[must_use]
pub const fn mid(l: usize, r: usize) -> usize {
    l + (r - l) / 2
}

/// Encodes an optional handle as its wire id (`0` for none).
#[inline]
#[must_use]
pub fn handle_to_raw(handle: Option<Idx<Node>>) -> usize {
    handle.map_or(0, Idx::into_raw)
}

// Node holds only handles and an i32; Debug prints raw handle ids.

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("left", &handle_to_raw(self.left))
            .field("right", &handle_to_raw(self.right))
            .field("val", &self.val)
            .finish()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        handle_to_raw(self.left) == handle_to_raw(other.left)
            && handle_to_raw(self.right) == handle_to_raw(other.right)
            && self.val == other.val
    }
}

impl Eq for Node {}
