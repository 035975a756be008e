//! Weighted union-find over three lockstep persistent arrays.
//!
//! `parent`, `rank` and `weight` are advanced together: version `k` means the
//! `k`-th root of each of the three arrays. Every committing union appends
//! exactly one version to each, so the three version lists always have the
//! same length.

use std::fmt;

use crate::arena::NodeArena;
use crate::array::{ArrayCheckpoint, PersistentArray, check_domain};
use crate::error::{Error, Result};
use crate::relation::Relation;
use crate::store::NodeStore;

/// Representative of an element together with its relation to it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Resolved {
    /// Root of the element's tree.
    pub root: usize,
    /// Relation of the element to `root`.
    pub relation: Relation,
}

/// Union-find whose every union produces a new immutable version.
///
/// No path compression is applied: compression would rewrite shared nodes.
/// Trees stay shallow through union by rank.
pub struct UnionFind<S = NodeArena> {
    parent: PersistentArray<S>,
    rank: PersistentArray<S>,
    weight: PersistentArray<S>,
}

// ---------------------------------------------------------------------------
// Construction & accessors
// ---------------------------------------------------------------------------

impl<S: NodeStore> UnionFind<S> {
    /// Creates version 0: `n` singletons, every rank 1, every weight 0.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyDomain`] for `n == 0`, [`Error::DomainTooLarge`] above
    /// `i32::MAX`.
    pub fn new(n: usize) -> Result<Self> {
        let n = check_domain(n)?;
        let last = i32::try_from(n).map_err(|_| Error::DomainTooLarge(n))?;
        let parents: Vec<i32> = (1..=last).collect();
        Ok(Self {
            parent: PersistentArray::build(&parents)?,
            rank: PersistentArray::build(&vec![1; n])?,
            weight: PersistentArray::build(&vec![0; n])?,
        })
    }

    /// Reassembles from decoded arrays, enforcing the lockstep invariant.
    pub(crate) fn from_arrays(
        parent: PersistentArray<S>,
        rank: PersistentArray<S>,
        weight: PersistentArray<S>,
    ) -> Result<Self> {
        let count = parent.version_count();
        if rank.version_count() != count || weight.version_count() != count {
            return Err(Error::Corrupt("version lists out of lockstep"));
        }
        let n = parent.domain_size();
        if rank.domain_size() != n || weight.domain_size() != n {
            return Err(Error::Corrupt("arrays disagree on domain size"));
        }
        Ok(Self {
            parent,
            rank,
            weight,
        })
    }

    /// Number of elements.
    #[must_use]
    pub const fn domain_size(&self) -> usize {
        self.parent.domain_size()
    }

    /// Number of committed versions (identical for all three arrays).
    #[must_use]
    pub const fn version_count(&self) -> usize {
        self.parent.version_count()
    }

    /// The `parent`, `rank` and `weight` arrays, in wire order.
    #[must_use]
    pub const fn arrays(&self) -> [&PersistentArray<S>; 3] {
        [&self.parent, &self.rank, &self.weight]
    }

    /// Raw parent of `x` at `version`.
    ///
    /// # Errors
    ///
    /// Same as [`PersistentArray::query`].
    pub fn parent_at(&self, version: usize, x: usize) -> Result<i32> {
        self.parent.query(version, x)
    }

    /// Raw rank of `x` at `version`.
    ///
    /// # Errors
    ///
    /// Same as [`PersistentArray::query`].
    pub fn rank_at(&self, version: usize, x: usize) -> Result<i32> {
        self.rank.query(version, x)
    }

    /// Relation of `x` to its parent at `version`.
    ///
    /// # Errors
    ///
    /// Same as [`PersistentArray::query`], plus [`Error::Corrupt`] for a
    /// stored weight outside `0..=2`.
    pub fn weight_at(&self, version: usize, x: usize) -> Result<Relation> {
        Relation::try_from(self.weight.query(version, x)?)
    }

    fn checkpoint(&self) -> [ArrayCheckpoint; 3] {
        [
            self.parent.checkpoint(),
            self.rank.checkpoint(),
            self.weight.checkpoint(),
        ]
    }

    fn rollback(&mut self, [parent, rank, weight]: [ArrayCheckpoint; 3]) {
        self.parent.rollback(parent);
        self.rank.rollback(rank);
        self.weight.rollback(weight);
    }

    fn position(&self, raw: i32) -> Result<usize> {
        usize::try_from(raw)
            .ok()
            .filter(|p| (1..=self.domain_size()).contains(p))
            .ok_or(Error::Corrupt("parent outside the domain"))
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

impl<S: NodeStore> UnionFind<S> {
    /// Resolves the root of `x` at `version` and `x`'s relation to it.
    ///
    /// Pure lookup; never allocates.
    ///
    /// # Errors
    ///
    /// [`Error::VersionOutOfRange`], [`Error::PositionOutOfRange`], or
    /// [`Error::Corrupt`] when the parent chain is malformed.
    pub fn find(&self, x: usize, version: usize) -> Result<Resolved> {
        let mut node = x;
        let mut relation = Relation::SAME;
        // A well-formed chain visits each element at most once.
        for _ in 0..self.domain_size() {
            let parent = self.parent.query(version, node)?;
            let parent = self.position(parent)?;
            if parent == node {
                return Ok(Resolved {
                    root: node,
                    relation,
                });
            }
            relation = relation + self.weight_at(version, node)?;
            node = parent;
        }
        Err(Error::Corrupt("parent chain does not reach a root"))
    }

    /// Relation of `a` to `b` at `version`, or `None` if they are not joined.
    ///
    /// # Errors
    ///
    /// Same as [`find`](Self::find).
    pub fn relation(&self, a: usize, b: usize, version: usize) -> Result<Option<Relation>> {
        let a = self.find(a, version)?;
        let b = self.find(b, version)?;
        Ok((a.root == b.root).then_some(a.relation - b.relation))
    }
}

// ---------------------------------------------------------------------------
// Union
// ---------------------------------------------------------------------------

impl<S: NodeStore> UnionFind<S> {
    /// Joins `a` and `b` at `version` so that `a` relates to `b` by `relation`.
    ///
    /// Returns the new version, or `version` itself if `a` and `b` already
    /// share a root. The existing relation is not checked against `relation`
    /// in that case; callers compare with [`relation`](Self::relation) first.
    ///
    /// # Errors
    ///
    /// Same as [`find`](Self::find). On error no version is committed.
    pub fn union(&mut self, a: usize, b: usize, relation: Relation, version: usize) -> Result<usize> {
        let ra = self.find(a, version)?;
        let rb = self.find(b, version)?;
        if ra.root == rb.root {
            return Ok(version);
        }
        let rank_a = self.rank.query(version, ra.root)?;
        let rank_b = self.rank.query(version, rb.root)?;

        let cp = self.checkpoint();
        match self.link(ra, rb, rank_a, rank_b, relation, version) {
            Ok(committed) => {
                tracing::debug!(a, b, %relation, version, committed, "union");
                Ok(committed)
            }
            Err(e) => {
                self.rollback(cp);
                Err(e)
            }
        }
    }

    /// Attaches the lower-ranked root under the other, one commit per array.
    fn link(
        &mut self,
        ra: Resolved,
        rb: Resolved,
        rank_a: i32,
        rank_b: i32,
        relation: Relation,
        version: usize,
    ) -> Result<usize> {
        let (child, root, weight, bump) = if rank_a <= rank_b {
            let bump = if rank_a == rank_b {
                Some(rank_b.checked_add(1).ok_or(Error::Corrupt("rank overflow"))?)
            } else {
                None
            };
            (ra.root, rb.root, rb.relation + relation - ra.relation, bump)
        } else {
            (rb.root, ra.root, ra.relation - relation - rb.relation, None)
        };

        let root_value = i32::try_from(root).map_err(|_| Error::DomainTooLarge(root))?;
        let committed = self.parent.update(version, child, root_value)?;
        let w = self.weight.update(version, child, weight.into())?;
        let r = match bump {
            Some(rank) => self.rank.update(version, root, rank)?,
            None => self.rank.carry(version)?,
        };
        debug_assert_eq!(committed, w);
        debug_assert_eq!(committed, r);
        Ok(committed)
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<S: NodeStore> fmt::Debug for UnionFind<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnionFind")
            .field("len", &self.domain_size())
            .field("versions", &self.version_count())
            .finish_non_exhaustive()
    }
}
