//! Batch pairwise alignment over multiple sequence pairs.
//!
//! Provides a simple serial implementation that builds one aligner for the
//! requested [`AlignmentMode`] and reuses it for every pair.

use crate::needleman_wunsch::GlobalAligner;
use crate::scoring::ScoringPolicy;
use crate::smith_waterman::LocalAligner;
use crate::types::{Alignment, AlignmentMode};
use lodestar_core::Result;

/// Align a batch of `(query, reference)` pairs with the given mode and policy.
///
/// Each pair is aligned independently and results are returned in the same order.
///
/// # Errors
///
/// Returns the first error raised by any individual alignment.
pub fn align_batch(
    pairs: &[(&[u8], &[u8])],
    mode: AlignmentMode,
    policy: &ScoringPolicy,
) -> Result<Vec<Alignment>> {
    log::debug!("aligning batch of {} pairs ({mode})", pairs.len());

    match mode {
        AlignmentMode::Global => {
            let aligner = GlobalAligner::new(*policy);
            pairs.iter().map(|(q, r)| aligner.align(q, r)).collect()
        }
        AlignmentMode::Local => {
            let aligner = LocalAligner::new(*policy);
            pairs.iter().map(|(q, r)| aligner.align(q, r)).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::MIN_SCORE;
    use lodestar_core::LodestarError;

    #[test]
    fn batch_multiple_pairs() {
        let pairs: Vec<(&[u8], &[u8])> = vec![
            (b"ACGT", b"ACGT"),
            (b"AAAA", b"CCCC"),
            (b"ACGT", b"ACT"),
        ];
        let results =
            align_batch(&pairs, AlignmentMode::Global, &ScoringPolicy::default()).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].score(), 4);
        assert_eq!(results[1].score(), -16);
        assert_eq!(results[2].operator_string(), "MM+M");
    }

    #[test]
    fn batch_local_mode() {
        let pairs: Vec<(&[u8], &[u8])> =
            vec![(b"AAACGTAAA", b"TTTCGTTTT"), (b"AAAA", b"CCCC")];
        let results =
            align_batch(&pairs, AlignmentMode::Local, &ScoringPolicy::default()).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].score(), 3);
        assert!(results[1].is_empty());
    }

    #[test]
    fn empty_batch() {
        let pairs: Vec<(&[u8], &[u8])> = vec![];
        let results =
            align_batch(&pairs, AlignmentMode::Global, &ScoringPolicy::default()).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn first_failure_is_returned() {
        let policy = ScoringPolicy::new(1, -1, (MIN_SCORE / 2 - 1) as i32, -1).unwrap();
        let pairs: Vec<(&[u8], &[u8])> = vec![(b"A", b"A"), (b"", b"AAA")];
        assert!(matches!(
            align_batch(&pairs, AlignmentMode::Global, &policy),
            Err(LodestarError::ArithmeticOverflow(_))
        ));
    }
}
