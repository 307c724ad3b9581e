//! Goal progress type with the 0⇄100 toggle rule.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error constructing a [`Progress`] value.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("progress must be between 0 and 100, got {0}")]
pub struct ProgressError(pub i32);

/// Goal completion percentage, 0 to 100 inclusive.
///
/// `100` means completed. The checklist toggle flips between the boundary
/// values only: a completed goal toggles to 0, anything else toggles to 100.
/// Partial progress can only be set through the edit form, never the toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Progress(i32);

impl Progress {
    /// Zero progress.
    pub const ZERO: Self = Self(0);
    /// Completed.
    pub const COMPLETE: Self = Self(100);

    /// Create a progress value, rejecting anything outside 0..=100.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressError`] if `value` is out of range.
    pub const fn new(value: i32) -> Result<Self, ProgressError> {
        if value < 0 || value > 100 {
            return Err(ProgressError(value));
        }
        Ok(Self(value))
    }

    /// Get the underlying percentage.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Whether the goal counts as completed.
    #[must_use]
    pub const fn is_complete(self) -> bool {
        self.0 == 100
    }

    /// The toggle rule: 100 flips to 0, everything else flips to 100.
    ///
    /// Note that this is an involution only at the boundary values - a
    /// partial progress of, say, 40 toggles to 100 and cannot be restored
    /// by toggling again.
    #[must_use]
    pub const fn toggled(self) -> Self {
        if self.0 == 100 { Self(0) } else { Self(100) }
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_enforced() {
        assert!(Progress::new(0).is_ok());
        assert!(Progress::new(100).is_ok());
        assert!(Progress::new(55).is_ok());
        assert_eq!(Progress::new(-1), Err(ProgressError(-1)));
        assert_eq!(Progress::new(101), Err(ProgressError(101)));
    }

    #[test]
    fn test_toggle_boundaries() {
        assert_eq!(Progress::ZERO.toggled(), Progress::COMPLETE);
        assert_eq!(Progress::COMPLETE.toggled(), Progress::ZERO);
    }

    #[test]
    fn test_toggle_involution_only_at_boundaries() {
        // At the boundaries, toggling twice restores the original.
        for v in [0, 100] {
            let p = Progress::new(v).unwrap();
            assert_eq!(p.toggled().toggled(), p);
        }
        // A partial value maps to 100 and is not recoverable.
        let partial = Progress::new(40).unwrap();
        assert_eq!(partial.toggled(), Progress::COMPLETE);
        assert_eq!(partial.toggled().toggled(), Progress::ZERO);
        assert_ne!(partial.toggled().toggled(), partial);
    }

    #[test]
    fn test_is_complete() {
        assert!(Progress::COMPLETE.is_complete());
        assert!(!Progress::new(99).unwrap().is_complete());
    }
}
