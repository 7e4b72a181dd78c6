//! Error types for motion utilities.

use thiserror::Error;

/// Errors that can occur validating motion state.
///
/// The hot-path functions in this crate never return errors; degenerate
/// inputs take documented fallback branches instead. Validation is opt-in
/// through [`SeparatingDistanceTracker::validate`].
///
/// [`SeparatingDistanceTracker::validate`]: crate::SeparatingDistanceTracker::validate
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum MotionError {
    /// A bounding radius is negative or non-finite.
    #[error("invalid bounding radius: {0} (must be finite and non-negative)")]
    InvalidBoundingRadius(f64),

    /// Tracked state contains `NaN` or `Inf`.
    #[error("motion state diverged: {reason}")]
    Diverged {
        /// Description of what went wrong.
        reason: String,
    },
}

impl MotionError {
    /// Create a diverged error.
    #[must_use]
    pub fn diverged(reason: impl Into<String>) -> Self {
        Self::Diverged {
            reason: reason.into(),
        }
    }

    /// Check if this is a divergence error.
    #[must_use]
    pub fn is_diverged(&self) -> bool {
        matches!(self, Self::Diverged { .. })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MotionError::InvalidBoundingRadius(-1.0);
        assert!(err.to_string().contains("-1"));

        let err = MotionError::diverged("NaN in separating normal");
        assert!(err.to_string().contains("NaN"));
    }

    #[test]
    fn test_error_predicates() {
        assert!(MotionError::diverged("test").is_diverged());
        assert!(!MotionError::InvalidBoundingRadius(f64::NAN).is_diverged());
    }
}
