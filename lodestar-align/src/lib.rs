//! Pairwise sequence alignment for the Lodestar toolkit.
//!
//! Provides global (Needleman-Wunsch) and local (Smith-Waterman) alignment of
//! two byte sequences under an affine gap model, backed by a packed
//! `(score, move)` dynamic-programming matrix.
//!
//! # Quick start
//!
//! ```
//! use lodestar_align::{align, AlignmentMode, ScoringPolicy};
//!
//! let policy = ScoringPolicy::default();
//! let result = align(b"GATTACA", b"GATTACA", AlignmentMode::Global, &policy).unwrap();
//! assert_eq!(result.score(), 7);
//! assert_eq!(result.operator_string(), "MMMMMMM");
//! ```

pub mod types;
pub mod scoring;
pub mod matrix;
mod kernel;
pub mod needleman_wunsch;
pub mod smith_waterman;
pub mod batch;

pub use types::{Alignment, AlignmentMode, AlignmentOperator};
pub use scoring::ScoringPolicy;
pub use matrix::{AlignmentMatrix, Cell, Move};
pub use needleman_wunsch::GlobalAligner;
pub use smith_waterman::LocalAligner;
pub use batch::align_batch;

/// Convenience function: align two sequences using the specified mode and policy.
///
/// Dispatches to [`LocalAligner`] for [`AlignmentMode::Local`] or
/// [`GlobalAligner`] for [`AlignmentMode::Global`].
///
/// # Errors
///
/// Returns an error if a cell score overflows the packed matrix encoding.
pub fn align(
    query: &[u8],
    reference: &[u8],
    mode: AlignmentMode,
    policy: &ScoringPolicy,
) -> lodestar_core::Result<Alignment> {
    match mode {
        AlignmentMode::Local => LocalAligner::new(*policy).align(query, reference),
        AlignmentMode::Global => GlobalAligner::new(*policy).align(query, reference),
    }
}
