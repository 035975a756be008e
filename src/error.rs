//! Error type shared by every operation.

/// Convenience alias for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Failure of an engine operation.
///
/// Precondition violations and decode failures leave the structure they were
/// issued against unchanged. Contradictory relations are not errors: they are
/// reported as values by [`relation`](crate::Dsu::relation).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A domain of size zero was requested.
    #[error("domain must contain at least one position")]
    EmptyDomain,
    /// The domain does not fit the persisted `int32` positions.
    #[error("domain of {0} positions exceeds i32::MAX")]
    DomainTooLarge(usize),
    /// A position outside `1..=len`.
    #[error("position {pos} outside 1..={len}")]
    PositionOutOfRange {
        /// Requested position.
        pos: usize,
        /// Domain size.
        len: usize,
    },
    /// A version index that has not been committed.
    #[error("version {version} out of range ({count} committed)")]
    VersionOutOfRange {
        /// Requested version.
        version: usize,
        /// Number of committed versions.
        count: usize,
    },
    /// Undo requested while only the initial version remains.
    #[error("cannot undo past the initial version")]
    UndoAtFloor,
    /// Time-travel target is committed but not on the live history stack.
    #[error("version {version} is not an ancestor on the history stack")]
    NotOnStack {
        /// Requested version.
        version: usize,
    },
    /// A count or handle does not fit the `int32` wire format.
    #[error("value {0} does not fit in an int32 field")]
    EncodeOverflow(usize),
    /// Input ended before a complete value could be read.
    #[error("truncated input: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        /// Bytes required by the next field.
        needed: usize,
        /// Bytes left in the input.
        remaining: usize,
    },
    /// Input or pool contents violate a structural invariant.
    #[error("corrupt structure: {0}")]
    Corrupt(&'static str),
    /// Underlying reader or writer failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
