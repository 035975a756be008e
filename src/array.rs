//! Versioned array over positions `1..=n` with path-copying updates.

use std::fmt;

use safe_bump::Idx;

use crate::arena::NodeArena;
use crate::error::{Error, Result};
use crate::node::Node;
use crate::ops::build::build_recursive;
use crate::ops::query::query_iterative;
use crate::ops::update::update_recursive;
use crate::store::{NodeStore, StoreCheckpoint};

/// Saved array state for rollback.
#[derive(Clone, Copy)]
pub(crate) struct ArrayCheckpoint {
    store: StoreCheckpoint,
    versions: usize,
}

/// Persistent array, one root per committed version.
///
/// Version 0 is the initial contents. Every [`update`](Self::update) appends
/// a version that shares all untouched subtrees with its predecessor; every
/// version ever returned stays readable.
pub struct PersistentArray<S = NodeArena> {
    store: S,
    versions: Vec<Idx<Node>>,
    len: usize,
}

// ---------------------------------------------------------------------------
// Construction & accessors
// ---------------------------------------------------------------------------

impl<S: NodeStore> PersistentArray<S> {
    /// Builds version 0 from `initial`, where `initial[p - 1]` is position `p`.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyDomain`] if `initial` is empty,
    /// [`Error::DomainTooLarge`] if it has more than `i32::MAX` elements.
    pub fn build(initial: &[i32]) -> Result<Self> {
        let len = check_domain(initial.len())?;
        let mut store = S::new();
        let root = build_recursive(&mut store, 1, len, initial);
        Ok(Self {
            store,
            versions: vec![root],
            len,
        })
    }

    /// Reassembles an array from decoded parts. Handles must already be
    /// validated against `store`.
    pub(crate) const fn from_parts(store: S, versions: Vec<Idx<Node>>, len: usize) -> Self {
        Self {
            store,
            versions,
            len,
        }
    }

    /// Number of positions.
    #[must_use]
    pub const fn domain_size(&self) -> usize {
        self.len
    }

    /// Number of committed versions.
    #[must_use]
    pub const fn version_count(&self) -> usize {
        self.versions.len()
    }

    /// Number of pool nodes, sentinel included.
    ///
    /// Includes nodes only reachable from undone versions.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.store.node_count()
    }

    pub(crate) fn roots(&self) -> &[Idx<Node>] {
        &self.versions
    }

    pub(crate) const fn store(&self) -> &S {
        &self.store
    }

    pub(crate) fn checkpoint(&self) -> ArrayCheckpoint {
        ArrayCheckpoint {
            store: self.store.checkpoint(),
            versions: self.versions.len(),
        }
    }

    pub(crate) fn rollback(&mut self, cp: ArrayCheckpoint) {
        self.versions.truncate(cp.versions);
        self.store.rollback(cp.store);
    }

    fn root(&self, version: usize) -> Result<Idx<Node>> {
        self.versions
            .get(version)
            .copied()
            .ok_or(Error::VersionOutOfRange {
                version,
                count: self.versions.len(),
            })
    }

    const fn check_pos(&self, pos: usize) -> Result<()> {
        if pos == 0 || pos > self.len {
            return Err(Error::PositionOutOfRange { pos, len: self.len });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Versioned operations
// ---------------------------------------------------------------------------

impl<S: NodeStore> PersistentArray<S> {
    /// Reads position `pos` as of `version`.
    ///
    /// # Errors
    ///
    /// [`Error::VersionOutOfRange`] or [`Error::PositionOutOfRange`] for bad
    /// arguments; [`Error::Corrupt`] if the pool is malformed.
    pub fn query(&self, version: usize, pos: usize) -> Result<i32> {
        let root = self.root(version)?;
        self.check_pos(pos)?;
        query_iterative(&self.store, root, 1, self.len, pos)
    }

    /// Commits a new version equal to `prev` except that `pos` holds `value`.
    ///
    /// Returns the new version index.
    ///
    /// # Errors
    ///
    /// Same as [`query`](Self::query). Nothing is allocated on error.
    pub fn update(&mut self, prev: usize, pos: usize, value: i32) -> Result<usize> {
        let root = self.root(prev)?;
        self.check_pos(pos)?;
        let new_root = update_recursive(&mut self.store, root, 1, self.len, pos, value)?;
        self.versions.push(new_root);
        tracing::trace!(prev, pos, value, version = self.versions.len() - 1, "array update");
        Ok(self.versions.len() - 1)
    }

    /// Commits a new version identical to `prev`, reusing its root.
    ///
    /// Allocates no nodes. Used to keep sibling arrays' version numbering
    /// aligned when this array has nothing to change.
    ///
    /// # Errors
    ///
    /// [`Error::VersionOutOfRange`] if `prev` is not committed.
    pub fn carry(&mut self, prev: usize) -> Result<usize> {
        let root = self.root(prev)?;
        self.versions.push(root);
        tracing::trace!(prev, version = self.versions.len() - 1, "array carry");
        Ok(self.versions.len() - 1)
    }
}

/// Validates a domain size for `int32` positions.
pub(crate) const fn check_domain(n: usize) -> Result<usize> {
    if n == 0 {
        return Err(Error::EmptyDomain);
    }
    if n > i32::MAX as usize {
        return Err(Error::DomainTooLarge(n));
    }
    Ok(n)
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<S: NodeStore> fmt::Debug for PersistentArray<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistentArray")
            .field("len", &self.len)
            .field("versions", &self.versions.len())
            .field("nodes", &self.store.node_count())
            .finish()
    }
}
