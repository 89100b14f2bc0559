//! Structured error types for the Lodestar crates.

use thiserror::Error;

/// Unified error type for all Lodestar operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LodestarError {
    /// Invalid argument (bad scoring weights, out-of-range values)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A value does not fit its fixed-width representation
    #[error("arithmetic overflow: {0}")]
    ArithmeticOverflow(String),
}

/// Convenience alias used throughout the Lodestar crates.
pub type Result<T> = std::result::Result<T, LodestarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_detail() {
        let err = LodestarError::InvalidArgument("match_score must be positive".into());
        assert_eq!(err.to_string(), "invalid argument: match_score must be positive");

        let err = LodestarError::ArithmeticOverflow("score 1 << 40".into());
        assert_eq!(err.to_string(), "arithmetic overflow: score 1 << 40");
    }

    #[test]
    fn result_alias_propagates() {
        fn inner() -> Result<i32> {
            Err(LodestarError::InvalidArgument("nope".into()))
        }
        fn outer() -> Result<i32> {
            let v = inner()?;
            Ok(v + 1)
        }
        assert!(matches!(outer(), Err(LodestarError::InvalidArgument(_))));
    }
}
