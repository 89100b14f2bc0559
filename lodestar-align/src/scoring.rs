//! Match/mismatch scoring with affine gap weights.
//!
//! A [`ScoringPolicy`] is the only configuration an aligner carries. It is
//! validated once at construction and never mutated afterwards, so a single
//! policy can be shared by any number of concurrent alignments.

use lodestar_core::{LodestarError, Result};

/// Four signed scoring weights for pairwise alignment.
///
/// `match_score` must be positive; the other three must be zero or negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawScoringPolicy"))]
pub struct ScoringPolicy {
    match_score: i32,
    mismatch_score: i32,
    gap_open: i32,
    gap_extend: i32,
}

impl ScoringPolicy {
    /// Create a new scoring policy.
    ///
    /// # Errors
    ///
    /// Returns [`LodestarError::InvalidArgument`] if `match_score` is not
    /// positive, or if `mismatch_score`, `gap_open` or `gap_extend` is positive.
    pub fn new(
        match_score: i32,
        mismatch_score: i32,
        gap_open: i32,
        gap_extend: i32,
    ) -> Result<Self> {
        if match_score <= 0 {
            return Err(LodestarError::InvalidArgument(format!(
                "match_score must be positive, got {match_score}"
            )));
        }
        if mismatch_score > 0 {
            return Err(LodestarError::InvalidArgument(format!(
                "mismatch_score must not be positive, got {mismatch_score}"
            )));
        }
        if gap_open > 0 {
            return Err(LodestarError::InvalidArgument(format!(
                "gap_open must not be positive, got {gap_open}"
            )));
        }
        if gap_extend > 0 {
            return Err(LodestarError::InvalidArgument(format!(
                "gap_extend must not be positive, got {gap_extend}"
            )));
        }
        Ok(Self {
            match_score,
            mismatch_score,
            gap_open,
            gap_extend,
        })
    }

    /// Score awarded when the two residues are identical.
    pub fn match_score(&self) -> i32 {
        self.match_score
    }

    /// Score charged when the two residues differ.
    pub fn mismatch_score(&self) -> i32 {
        self.mismatch_score
    }

    /// Score charged for the first position of a gap.
    pub fn gap_open(&self) -> i32 {
        self.gap_open
    }

    /// Score charged for each further contiguous gap position.
    pub fn gap_extend(&self) -> i32 {
        self.gap_extend
    }

    /// Score a pair of residues. Comparison is exact (case-sensitive).
    #[inline]
    pub fn score_pair(&self, a: u8, b: u8) -> i32 {
        if a == b {
            self.match_score
        } else {
            self.mismatch_score
        }
    }
}

impl Default for ScoringPolicy {
    /// Short-read aligner defaults: +1 match, -4 mismatch, -6 gap open, -1 gap extend.
    fn default() -> Self {
        Self {
            match_score: 1,
            mismatch_score: -4,
            gap_open: -6,
            gap_extend: -1,
        }
    }
}

/// Unvalidated wire form; deserialization funnels through [`ScoringPolicy::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawScoringPolicy {
    match_score: i32,
    mismatch_score: i32,
    gap_open: i32,
    gap_extend: i32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawScoringPolicy> for ScoringPolicy {
    type Error = LodestarError;

    fn try_from(raw: RawScoringPolicy) -> Result<Self> {
        ScoringPolicy::new(raw.match_score, raw.mismatch_score, raw.gap_open, raw.gap_extend)
    }
}
