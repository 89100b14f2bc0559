//! Needleman-Wunsch global alignment with affine gap penalties.
//!
//! Uses a single packed matrix: a gap is extended rather than opened when the
//! neighbouring cell's recorded move already runs in the same direction. The
//! first row and column charge `gap_open` at every step.

use lodestar_core::Result;

use crate::kernel::{candidates, choose, traceback};
use crate::matrix::{AlignmentMatrix, Move};
use crate::scoring::ScoringPolicy;
use crate::types::Alignment;

/// Global (end-to-end) aligner.
///
/// Holds only immutable configuration, so one instance can serve concurrent
/// callers.
#[derive(Debug, Clone, Default)]
pub struct GlobalAligner {
    policy: ScoringPolicy,
    log_matrix: bool,
}

impl GlobalAligner {
    /// Create a global aligner scoring with `policy`.
    pub fn new(policy: ScoringPolicy) -> Self {
        Self {
            policy,
            log_matrix: false,
        }
    }

    /// Emit each filled matrix at `trace` level.
    pub fn with_matrix_logging(mut self, enabled: bool) -> Self {
        self.log_matrix = enabled;
        self
    }

    /// The scoring policy this aligner was built with.
    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Fill the scoring matrix for `query` against `reference`.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticOverflow`](lodestar_core::LodestarError::ArithmeticOverflow)
    /// if any cell score leaves the packable range.
    pub fn fill(&self, query: &[u8], reference: &[u8]) -> Result<AlignmentMatrix> {
        let n = query.len();
        let m = reference.len();
        let mut matrix = AlignmentMatrix::for_sequences(query, reference)?;
        let gap_open = self.policy.gap_open() as i64;

        // (0, 0) is already (0, End)
        for y in 1..=m {
            let score = matrix.score(0, y - 1) as i64 + gap_open;
            matrix.set(0, y, score, Move::Left)?;
        }
        for x in 1..=n {
            let score = matrix.score(x - 1, 0) as i64 + gap_open;
            matrix.set(x, 0, score, Move::Up)?;
        }

        for x in 1..=n {
            for y in 1..=m {
                let (diag, left, up) = candidates(&matrix, &self.policy, query, reference, x, y);
                let (score, direction) = choose(diag, left, up);
                matrix.set(x, y, score, direction)?;
            }
        }

        Ok(matrix)
    }

    /// Align `query` against `reference` end to end.
    ///
    /// Empty inputs are valid: the result is a run of pure insertions or
    /// deletions (or nothing at all when both are empty).
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticOverflow`](lodestar_core::LodestarError::ArithmeticOverflow)
    /// if any cell score leaves the packable range.
    pub fn align(&self, query: &[u8], reference: &[u8]) -> Result<Alignment> {
        let n = query.len();
        let m = reference.len();
        let matrix = self.fill(query, reference)?;

        if self.log_matrix && log::log_enabled!(log::Level::Trace) {
            log::trace!("global alignment matrix:\n{}", matrix.render(query, reference));
        }

        // (0, 0) is the only End cell, so traceback always returns to the origin
        let (operators, _, _) = traceback(&matrix, query, reference, n, m);
        let score = matrix.score(n, m);

        log::debug!(
            "global alignment: query_len={} reference_len={} score={}",
            n,
            m,
            score
        );

        Ok(Alignment::new(operators, score, 0, n, 0, m))
    }
}
