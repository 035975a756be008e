//! Version history: a stack of committed versions with undo and time travel.

use crate::error::{Error, Result};

/// Stack of version indices; the top is the current version.
///
/// Never empty: version 0 sits at the bottom and cannot be undone.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct History {
    stack: Vec<usize>,
}

impl History {
    /// Creates a history holding only version 0.
    #[must_use]
    pub fn new() -> Self {
        Self { stack: vec![0] }
    }

    /// Restores a history from its bottom-to-top contents.
    pub(crate) fn from_stack(stack: Vec<usize>, version_count: usize) -> Result<Self> {
        if stack.first() != Some(&0) {
            return Err(Error::Corrupt("history must start at version 0"));
        }
        if stack.iter().any(|&v| v >= version_count) {
            return Err(Error::Corrupt("history references an uncommitted version"));
        }
        Ok(Self { stack })
    }

    /// The current version.
    #[must_use]
    pub fn current(&self) -> usize {
        self.stack.last().copied().unwrap_or_default()
    }

    /// Number of entries, the initial version included.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Entries from bottom (version 0) to top (current).
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.stack
    }

    /// Pushes a newly committed version.
    pub fn commit(&mut self, version: usize) {
        self.stack.push(version);
    }

    /// Drops the current version, returning the one below it.
    ///
    /// # Errors
    ///
    /// [`Error::UndoAtFloor`] if only the initial version remains.
    pub fn undo(&mut self) -> Result<usize> {
        if self.stack.len() <= 1 {
            return Err(Error::UndoAtFloor);
        }
        self.stack.pop();
        Ok(self.current())
    }

    /// Pops until `target` is on top.
    ///
    /// Only versions still on the stack are reachable; a version that was
    /// undone and replaced is not. The stack is unchanged on error.
    ///
    /// # Errors
    ///
    /// [`Error::VersionOutOfRange`] if `target >= version_count`,
    /// [`Error::NotOnStack`] if it is committed but not on the stack.
    pub fn time_travel(&mut self, target: usize, version_count: usize) -> Result<usize> {
        if target >= version_count {
            return Err(Error::VersionOutOfRange {
                version: target,
                count: version_count,
            });
        }
        let Some(pos) = self.stack.iter().rposition(|&v| v == target) else {
            return Err(Error::NotOnStack { version: target });
        };
        self.stack.truncate(pos + 1);
        Ok(target)
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
