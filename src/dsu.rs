//! Versioned union-find with undo and time travel.

use std::fmt;
use std::io;

use crate::arena::NodeArena;
use crate::codec;
use crate::error::Result;
use crate::history::History;
use crate::relation::Relation;
use crate::store::NodeStore;
use crate::union_find::{Resolved, UnionFind};

/// Result of [`Dsu::union`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum UnionOutcome {
    /// A new version was committed and is now current.
    Merged(usize),
    /// Both elements already shared a root; the current version is unchanged.
    AlreadyJoined(usize),
}

impl UnionOutcome {
    /// The current version after the call.
    #[must_use]
    pub const fn version(self) -> usize {
        match self {
            Self::Merged(v) | Self::AlreadyJoined(v) => v,
        }
    }
}

/// Union-find over `1..=n` with a linear version history.
///
/// Queries and unions act on the current version (the top of the history).
/// Every committed version stays readable through the `*_at` methods, also
/// after it has been undone.
pub struct Dsu<S = NodeArena> {
    uf: UnionFind<S>,
    history: History,
}

// ---------------------------------------------------------------------------
// Construction & accessors
// ---------------------------------------------------------------------------

impl<S: NodeStore> Dsu<S> {
    /// Creates `n` singletons at version 0.
    ///
    /// # Errors
    ///
    /// Same as [`UnionFind::new`].
    pub fn new(n: usize) -> Result<Self> {
        Ok(Self {
            uf: UnionFind::new(n)?,
            history: History::new(),
        })
    }

    pub(crate) const fn from_parts(uf: UnionFind<S>, history: History) -> Self {
        Self { uf, history }
    }

    /// Number of elements.
    #[must_use]
    pub const fn domain_size(&self) -> usize {
        self.uf.domain_size()
    }

    /// The current version.
    #[must_use]
    pub fn current(&self) -> usize {
        self.history.current()
    }

    /// Number of committed versions, undone ones included.
    #[must_use]
    pub const fn version_count(&self) -> usize {
        self.uf.version_count()
    }

    /// The version history.
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// The underlying union-find, for direct access to every version.
    #[must_use]
    pub const fn union_find(&self) -> &UnionFind<S> {
        &self.uf
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

impl<S: NodeStore> Dsu<S> {
    /// Resolves `x` at the current version.
    ///
    /// # Errors
    ///
    /// Same as [`UnionFind::find`].
    pub fn find(&self, x: usize) -> Result<Resolved> {
        self.uf.find(x, self.current())
    }

    /// Resolves `x` at any committed version.
    ///
    /// # Errors
    ///
    /// Same as [`UnionFind::find`].
    pub fn find_at(&self, x: usize, version: usize) -> Result<Resolved> {
        self.uf.find(x, version)
    }

    /// Relation of `a` to `b` at the current version; `None` if unknown.
    ///
    /// # Errors
    ///
    /// Same as [`UnionFind::relation`].
    pub fn relation(&self, a: usize, b: usize) -> Result<Option<Relation>> {
        self.uf.relation(a, b, self.current())
    }

    /// Relation of `a` to `b` at any committed version.
    ///
    /// # Errors
    ///
    /// Same as [`UnionFind::relation`].
    pub fn relation_at(&self, a: usize, b: usize, version: usize) -> Result<Option<Relation>> {
        self.uf.relation(a, b, version)
    }

    /// Raw parent of `x` at `version`.
    ///
    /// # Errors
    ///
    /// Same as [`UnionFind::parent_at`].
    pub fn parent_at(&self, version: usize, x: usize) -> Result<i32> {
        self.uf.parent_at(version, x)
    }

    /// Raw rank of `x` at `version`.
    ///
    /// # Errors
    ///
    /// Same as [`UnionFind::rank_at`].
    pub fn rank_at(&self, version: usize, x: usize) -> Result<i32> {
        self.uf.rank_at(version, x)
    }

    /// Relation of `x` to its parent at `version`.
    ///
    /// # Errors
    ///
    /// Same as [`UnionFind::weight_at`].
    pub fn weight_at(&self, version: usize, x: usize) -> Result<Relation> {
        self.uf.weight_at(version, x)
    }
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

impl<S: NodeStore> Dsu<S> {
    /// Joins `a` and `b` at the current version with `a` relating to `b` by
    /// `relation`, and makes the result current.
    ///
    /// # Errors
    ///
    /// Same as [`UnionFind::union`]; the history is unchanged on error.
    pub fn union(&mut self, a: usize, b: usize, relation: Relation) -> Result<UnionOutcome> {
        let current = self.current();
        let version = self.uf.union(a, b, relation, current)?;
        if version == current {
            return Ok(UnionOutcome::AlreadyJoined(current));
        }
        self.history.commit(version);
        Ok(UnionOutcome::Merged(version))
    }

    /// Returns to the previous version on the history stack.
    ///
    /// # Errors
    ///
    /// [`Error::UndoAtFloor`](crate::Error::UndoAtFloor) at version 0.
    pub fn undo(&mut self) -> Result<usize> {
        let from = self.current();
        let to = self.history.undo()?;
        tracing::debug!(from, to, "undo");
        Ok(to)
    }

    /// Pops the history until `target` is current.
    ///
    /// # Errors
    ///
    /// Same as [`History::time_travel`].
    pub fn time_travel(&mut self, target: usize) -> Result<usize> {
        let from = self.current();
        let to = self.history.time_travel(target, self.uf.version_count())?;
        tracing::debug!(from, to, "time travel");
        Ok(to)
    }
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

impl<S: NodeStore> Dsu<S> {
    /// Serializes the full version history.
    ///
    /// # Errors
    ///
    /// [`Error::EncodeOverflow`](crate::Error::EncodeOverflow) if a count
    /// exceeds `i32::MAX`.
    pub fn save(&self) -> Result<Vec<u8>> {
        codec::encode(self)
    }

    /// Writes [`save`](Self::save) output to `writer`.
    ///
    /// # Errors
    ///
    /// [`Error::Io`](crate::Error::Io) if the writer fails, otherwise as
    /// [`save`](Self::save). `self` is never modified.
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(&self.save()?)?;
        writer.flush()?;
        Ok(())
    }

    /// Restores a structure from [`save`](Self::save) output.
    ///
    /// # Errors
    ///
    /// [`Error::Truncated`](crate::Error::Truncated) or
    /// [`Error::Corrupt`](crate::Error::Corrupt) for malformed input. No
    /// partially restored value is ever returned.
    pub fn load(bytes: &[u8]) -> Result<Self> {
        codec::decode(bytes)
    }

    /// Reads `reader` to the end and restores a structure from it.
    ///
    /// # Errors
    ///
    /// [`Error::Io`](crate::Error::Io) if the reader fails, otherwise as
    /// [`load`](Self::load).
    pub fn read_from<R: io::Read>(mut reader: R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::load(&bytes)
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<S: NodeStore> fmt::Debug for Dsu<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dsu")
            .field("len", &self.domain_size())
            .field("current", &self.current())
            .field("versions", &self.version_count())
            .field("history", &self.history.as_slice())
            .finish()
    }
}
