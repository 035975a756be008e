//! Binary snapshot of the full version history.
//!
//! Layout, every integer a little-endian `i32`:
//!
//! ```text
//! n
//! stack_size, stack[stack_size]            top first
//! 3 × (parent, rank, weight):
//!     version_count, roots[version_count]
//!     pool_size                            highest node id
//!     (left, right, val)[pool_size + 1]    node 0 is the all-zero sentinel
//! ```

use safe_bump::Idx;

use crate::array::{PersistentArray, check_domain};
use crate::dsu::Dsu;
use crate::error::{Error, Result};
use crate::history::History;
use crate::node::{self, Node};
use crate::store::NodeStore;
use crate::union_find::UnionFind;

/// Bytes per encoded integer.
const INT: usize = 4;

/// Bytes per encoded node.
const NODE: usize = 3 * INT;

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Serializes `dsu`.
pub fn encode<S: NodeStore>(dsu: &Dsu<S>) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    put(&mut out, dsu.domain_size())?;

    let stack = dsu.history().as_slice();
    put(&mut out, stack.len())?;
    for &version in stack.iter().rev() {
        put(&mut out, version)?;
    }

    for array in dsu.union_find().arrays() {
        encode_array(&mut out, array)?;
    }
    tracing::debug!(
        bytes = out.len(),
        versions = dsu.version_count(),
        current = dsu.current(),
        "encoded snapshot"
    );
    Ok(out)
}

fn encode_array<S: NodeStore>(out: &mut Vec<u8>, array: &PersistentArray<S>) -> Result<()> {
    let roots = array.roots();
    put(out, roots.len())?;
    for &root in roots {
        put(out, root.into_raw())?;
    }

    let store = array.store();
    let count = store.node_count();
    put(out, count - 1)?;
    for raw in 0..count {
        let n = store.get(Idx::from_raw(raw));
        put(out, node::handle_to_raw(n.left))?;
        put(out, node::handle_to_raw(n.right))?;
        out.extend_from_slice(&n.val.to_le_bytes());
    }
    Ok(())
}

fn put(out: &mut Vec<u8>, value: usize) -> Result<()> {
    let value = i32::try_from(value).map_err(|_| Error::EncodeOverflow(value))?;
    out.extend_from_slice(&value.to_le_bytes());
    Ok(())
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Restores a structure from `bytes`, validating every handle and count.
pub fn decode<S: NodeStore>(bytes: &[u8]) -> Result<Dsu<S>> {
    decode_inner(bytes).inspect_err(|e| tracing::warn!(error = %e, "rejected snapshot"))
}

fn decode_inner<S: NodeStore>(bytes: &[u8]) -> Result<Dsu<S>> {
    let mut r = Reader { bytes };
    let n = check_domain(r.count()?)?;

    let depth = r.count()?;
    r.ensure(depth, INT)?;
    let mut stack = (0..depth).map(|_| r.count()).collect::<Result<Vec<_>>>()?;
    stack.reverse();

    let parent = decode_array::<S>(&mut r, n)?;
    let rank = decode_array::<S>(&mut r, n)?;
    let weight = decode_array::<S>(&mut r, n)?;
    if !r.bytes.is_empty() {
        return Err(Error::Corrupt("trailing bytes after snapshot"));
    }

    let uf = UnionFind::from_arrays(parent, rank, weight)?;
    let history = History::from_stack(stack, uf.version_count())?;
    tracing::debug!(
        bytes = bytes.len(),
        versions = uf.version_count(),
        current = history.current(),
        "decoded snapshot"
    );
    Ok(Dsu::from_parts(uf, history))
}

fn decode_array<S: NodeStore>(r: &mut Reader<'_>, n: usize) -> Result<PersistentArray<S>> {
    let versions = r.count()?;
    if versions == 0 {
        return Err(Error::Corrupt("array without a version"));
    }
    r.ensure(versions, INT)?;
    let roots = (0..versions).map(|_| r.count()).collect::<Result<Vec<_>>>()?;

    let nodes = r
        .count()?
        .checked_add(1)
        .ok_or(Error::Corrupt("pool size overflow"))?;
    r.ensure(nodes, NODE)?;

    let sentinel = read_node(r, nodes)?;
    if sentinel != Node::SENTINEL {
        return Err(Error::Corrupt("pool slot 0 is not the sentinel"));
    }
    let mut store = S::new();
    for _ in 1..nodes {
        store.alloc(read_node(r, nodes)?);
    }

    let roots = roots
        .into_iter()
        .map(|raw| {
            if raw == 0 || raw >= nodes {
                return Err(Error::Corrupt("version root outside the pool"));
            }
            Ok(Idx::from_raw(raw))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(PersistentArray::from_parts(store, roots, n))
}

fn read_node(r: &mut Reader<'_>, nodes: usize) -> Result<Node> {
    let left = read_handle(r, nodes)?;
    let right = read_handle(r, nodes)?;
    let val = r.i32()?;
    if left.is_some() != right.is_some() {
        return Err(Error::Corrupt("node with a single child"));
    }
    Ok(Node { left, right, val })
}

fn read_handle(r: &mut Reader<'_>, nodes: usize) -> Result<Option<Idx<Node>>> {
    match r.count()? {
        0 => Ok(None),
        raw if raw < nodes => Ok(Some(Idx::from_raw(raw))),
        _ => Err(Error::Corrupt("child handle outside the pool")),
    }
}

/// Cursor over the remaining input.
struct Reader<'a> {
    bytes: &'a [u8],
}

impl Reader<'_> {
    fn i32(&mut self) -> Result<i32> {
        let Some((head, rest)) = self.bytes.split_first_chunk::<INT>() else {
            return Err(Error::Truncated {
                needed: INT,
                remaining: self.bytes.len(),
            });
        };
        self.bytes = rest;
        Ok(i32::from_le_bytes(*head))
    }

    /// Reads a non-negative integer.
    fn count(&mut self) -> Result<usize> {
        usize::try_from(self.i32()?).map_err(|_| Error::Corrupt("negative count or handle"))
    }

    /// Fails unless `count` items of `width` bytes remain, before anything
    /// is allocated for them.
    fn ensure(&self, count: usize, width: usize) -> Result<()> {
        let needed = count
            .checked_mul(width)
            .ok_or(Error::Corrupt("count overflow"))?;
        if needed > self.bytes.len() {
            return Err(Error::Truncated {
                needed,
                remaining: self.bytes.len(),
            });
        }
        Ok(())
    }
}
