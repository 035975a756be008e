//! Versioned union-find with mod-3 relations.
//!
//! Every union produces a new immutable version instead of mutating state.
//! Earlier versions stay fully queryable, the current version can be undone
//! or rewound to any ancestor still on the history stack, and the whole
//! history serializes to a compact binary snapshot.
//!
//! # Key properties
//!
//! - **Path-copying arrays**: an update allocates one node per tree level
//!   and shares everything else with the previous version
//! - **Lockstep versions**: `parent`, `rank` and `weight` always have the same
//!   number of versions; version `k` is the `k`-th root of each
//! - **Relations, not just membership**: every element carries a ℤ/3 label
//!   relative to its parent; labels compose by addition along the path
//! - **Zero `unsafe`**: enforced by `#![forbid(unsafe_code)]`
//!
//! # Example
//!
//! ```
//! use versioned_dsu::{Relation, VersionedDsu};
//!
//! let mut dsu = VersionedDsu::new(5)?;
//! dsu.union(1, 2, Relation::SAME)?;
//! dsu.union(2, 3, Relation::DOMINATES)?;
//! assert_eq!(dsu.relation(1, 3)?, Some(Relation::DOMINATES));
//!
//! dsu.undo()?;
//! assert_eq!(dsu.relation(2, 3)?, None);
//! # Ok::<(), versioned_dsu::Error>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod array;
pub mod claims;
pub mod history;
pub mod node;
pub mod relation;
pub mod store;
pub mod union_find;

mod arena;
mod arena_sync;
mod codec;
mod dsu;
mod error;
mod ops;

#[cfg(test)]
mod tests;

pub use arena::NodeArena;
pub use arena_sync::NodeArenaSync;
pub use array::PersistentArray;
pub use claims::{Claim, ClaimChecker, Verdict};
pub use dsu::{Dsu, UnionOutcome};
pub use error::{Error, Result};
pub use history::History;
pub use relation::Relation;
pub use union_find::{Resolved, UnionFind};

/// Single-threaded versioned union-find.
pub type VersionedDsu = Dsu<NodeArena>;

/// `Send + Sync` versioned union-find.
pub type VersionedDsuSync = Dsu<NodeArenaSync>;
