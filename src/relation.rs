//! Relation labels: the cyclic group ℤ/3.
//!
//! A weight `w` on an edge `x → parent(x)` states how `x` relates to its
//! parent. Relations compose along a path by addition mod 3, so the relation
//! of `x` to its root is the sum of the weights on the way up, and the
//! relation of `a` to `b` under a common root is `rel(a) - rel(b)`.

use std::fmt;
use std::ops::{Add, Neg, Sub};

use crate::error::Error;

/// Element of ℤ/3 describing a directed relation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Relation(u8);

impl Relation {
    /// Same class.
    pub const SAME: Self = Self(0);
    /// Left side dominates right side.
    pub const DOMINATES: Self = Self(1);
    /// Left side is dominated by right side.
    pub const DOMINATED: Self = Self(2);

    /// All three relations in label order.
    pub const ALL: [Self; 3] = [Self::SAME, Self::DOMINATES, Self::DOMINATED];

    /// Returns the label in `0..=2`.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Maps an optional relation to the integer form, `-1` for unknown.
    #[must_use]
    pub fn to_raw_or_unknown(relation: Option<Self>) -> i32 {
        relation.map_or(-1, i32::from)
    }
}

impl Add for Relation {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self((self.0 + rhs.0) % 3)
    }
}

impl Sub for Relation {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self((self.0 + 3 - rhs.0) % 3)
    }
}

impl Neg for Relation {
    type Output = Self;

    fn neg(self) -> Self {
        Self((3 - self.0) % 3)
    }
}

impl From<Relation> for i32 {
    fn from(relation: Relation) -> Self {
        Self::from(relation.0)
    }
}

impl TryFrom<i32> for Relation {
    type Error = Error;

    fn try_from(raw: i32) -> Result<Self, Error> {
        u8::try_from(raw)
            .ok()
            .filter(|v| *v < 3)
            .map(Self)
            .ok_or(Error::Corrupt("relation weight outside 0..=2"))
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self.0 {
            0 => "same",
            1 => "dominates",
            _ => "dominated",
        })
    }
}
