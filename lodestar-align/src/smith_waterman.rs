//! Smith-Waterman local alignment with affine gap penalties.
//!
//! Scores cells with the same recurrence as Needleman-Wunsch, but the border
//! is free and any cell whose best candidate is not positive restarts as
//! `(0, End)`. Traceback begins at the first cell to reach the highest score
//! and stops at the first `End` cell it meets.

use lodestar_core::Result;

use crate::kernel::{candidates, choose, traceback};
use crate::matrix::{AlignmentMatrix, Move};
use crate::scoring::ScoringPolicy;
use crate::types::Alignment;

/// Position and value of the best cell seen during the fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct BestCell {
    score: i32,
    x: usize,
    y: usize,
}

/// Local (best sub-alignment) aligner.
///
/// Holds only immutable configuration, so one instance can serve concurrent
/// callers.
#[derive(Debug, Clone, Default)]
pub struct LocalAligner {
    policy: ScoringPolicy,
    log_matrix: bool,
}

impl LocalAligner {
    /// Create a local aligner scoring with `policy`.
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
        self.fill_tracking_best(query, reference)
            .map(|(matrix, _)| matrix)
    }

    fn fill_tracking_best(
        &self,
        query: &[u8],
        reference: &[u8],
    ) -> Result<(AlignmentMatrix, BestCell)> {
        // a fresh matrix is all (0, End): row 0 and column 0 need no seeding
        let mut matrix = AlignmentMatrix::for_sequences(query, reference)?;
        let mut best = BestCell::default();

        for x in 1..=query.len() {
            for y in 1..=reference.len() {
                let (diag, left, up) = candidates(&matrix, &self.policy, query, reference, x, y);
                let (score, direction) = match choose(diag, left, up) {
                    (s, _) if s <= 0 => (0, Move::End),
                    chosen => chosen,
                };
                matrix.set(x, y, score, direction)?;

                // strict: the first cell to reach a maximum keeps it
                if score > best.score as i64 {
                    best = BestCell {
                        score: score as i32,
                        x,
                        y,
                    };
                }
            }
        }

        Ok((matrix, best))
    }

    /// Find the best-scoring local alignment of `query` against `reference`.
    ///
    /// When no cell scores above zero (including empty inputs) the result is
    /// empty, with score 0 and every offset 0.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticOverflow`](lodestar_core::LodestarError::ArithmeticOverflow)
    /// if any cell score leaves the packable range.
    pub fn align(&self, query: &[u8], reference: &[u8]) -> Result<Alignment> {
        let (matrix, best) = self.fill_tracking_best(query, reference)?;

        if self.log_matrix && log::log_enabled!(log::Level::Trace) {
            log::trace!("local alignment matrix:\n{}", matrix.render(query, reference));
        }

        if best.score == 0 {
            log::debug!(
                "local alignment: query_len={} reference_len={} no positive cell",
                query.len(),
                reference.len()
            );
            return Ok(Alignment::empty());
        }

        let (operators, query_start, reference_start) =
            traceback(&matrix, query, reference, best.x, best.y);

        log::debug!(
            "local alignment: query={}..{} reference={}..{} score={}",
            query_start,
            best.x,
            reference_start,
            best.y,
            best.score
        );

        Ok(Alignment::new(
            operators,
            best.score,
            query_start,
            best.x,
            reference_start,
            best.y,
        ))
    }
}
