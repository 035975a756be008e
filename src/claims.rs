//! Claim checker. Feeds relation claims into a [`Dsu`] and counts the ones
//! that contradict what is already known.
//!
//! The engine itself only resolves and reports relations; deciding that a
//! claim is false happens here.

use std::fmt;

use crate::arena::NodeArena;
use crate::dsu::{Dsu, UnionOutcome};
use crate::error::Result;
use crate::relation::Relation;
use crate::store::NodeStore;

/// A claimed relation between two elements.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Claim {
    /// Both elements belong to the same class.
    Same(usize, usize),
    /// The first element dominates the second.
    Dominates(usize, usize),
}

impl Claim {
    /// The two elements and the relation claimed between them.
    #[must_use]
    pub const fn parts(self) -> (usize, usize, Relation) {
        match self {
            Self::Same(a, b) => (a, b, Relation::SAME),
            Self::Dominates(a, b) => (a, b, Relation::DOMINATES),
        }
    }
}

/// How a claim was received.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Verdict {
    /// The relation was unknown; the claim was recorded as `version`.
    Merged(usize),
    /// The relation was already known and agrees.
    Confirmed,
    /// The claim names an element outside the domain or disagrees with the
    /// known relation.
    Contradiction,
}

/// Applies claims in order against the current version of a [`Dsu`].
pub struct ClaimChecker<S = NodeArena> {
    dsu: Dsu<S>,
    contradictions: usize,
}

impl<S: NodeStore> ClaimChecker<S> {
    /// Starts with `n` unrelated elements.
    ///
    /// # Errors
    ///
    /// Same as [`Dsu::new`].
    pub fn new(n: usize) -> Result<Self> {
        Ok(Self::with_dsu(Dsu::new(n)?))
    }

    /// Continues from an existing structure, e.g. one restored by
    /// [`Dsu::load`].
    #[must_use]
    pub const fn with_dsu(dsu: Dsu<S>) -> Self {
        Self {
            dsu,
            contradictions: 0,
        }
    }

    /// Number of contradictions seen so far.
    #[must_use]
    pub const fn contradictions(&self) -> usize {
        self.contradictions
    }

    /// The underlying structure.
    #[must_use]
    pub const fn dsu(&self) -> &Dsu<S> {
        &self.dsu
    }

    /// Mutable access for undo and time travel.
    pub const fn dsu_mut(&mut self) -> &mut Dsu<S> {
        &mut self.dsu
    }

    /// Gives back the underlying structure.
    #[must_use]
    pub fn into_dsu(self) -> Dsu<S> {
        self.dsu
    }

    /// Checks `claim` against the current version and records it if new.
    ///
    /// # Errors
    ///
    /// Only if the underlying structure is corrupt; a false claim is a
    /// [`Verdict::Contradiction`], not an error.
    pub fn apply(&mut self, claim: Claim) -> Result<Verdict> {
        let verdict = self.judge(claim)?;
        if verdict == Verdict::Contradiction {
            self.contradictions += 1;
        }
        tracing::debug!(?claim, ?verdict, contradictions = self.contradictions, "claim");
        Ok(verdict)
    }

    /// Applies every claim, returning the contradiction total.
    ///
    /// # Errors
    ///
    /// Same as [`apply`](Self::apply).
    pub fn apply_all<I: IntoIterator<Item = Claim>>(&mut self, claims: I) -> Result<usize> {
        for claim in claims {
            self.apply(claim)?;
        }
        Ok(self.contradictions)
    }

    fn judge(&mut self, claim: Claim) -> Result<Verdict> {
        let (a, b, claimed) = claim.parts();
        let n = self.dsu.domain_size();
        if !(1..=n).contains(&a) || !(1..=n).contains(&b) {
            return Ok(Verdict::Contradiction);
        }
        match self.dsu.relation(a, b)? {
            None => match self.dsu.union(a, b, claimed)? {
                UnionOutcome::Merged(version) | UnionOutcome::AlreadyJoined(version) => {
                    Ok(Verdict::Merged(version))
                }
            },
            Some(known) if known == claimed => Ok(Verdict::Confirmed),
            Some(_) => Ok(Verdict::Contradiction),
        }
    }
}

impl<S: NodeStore> fmt::Debug for ClaimChecker<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClaimChecker")
            .field("dsu", &self.dsu)
            .field("contradictions", &self.contradictions)
            .finish()
    }
}
