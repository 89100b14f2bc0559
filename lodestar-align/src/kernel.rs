//! Scoring recurrence and traceback shared by the global and local aligners.
//!
//! Both aligners score a cell from the same three candidates and follow the
//! same move pointers back; they differ only in how the border is seeded, in
//! the local restart clamp, and in where traceback begins.

use crate::matrix::{AlignmentMatrix, Move};
use crate::scoring::ScoringPolicy;
use crate::types::AlignmentOperator;

/// The three candidate scores for cell `(x, y)`, computed in `i64`.
///
/// A gap candidate is charged `gap_extend` when its neighbour already moved in
/// the same direction, `gap_open` otherwise.
#[inline]
pub(crate) fn candidates(
    matrix: &AlignmentMatrix,
    policy: &ScoringPolicy,
    query: &[u8],
    reference: &[u8],
    x: usize,
    y: usize,
) -> (i64, i64, i64) {
    let diag = matrix.score(x - 1, y - 1) as i64
        + policy.score_pair(query[x - 1], reference[y - 1]) as i64;

    let left_gap = if matrix.direction(x, y - 1) == Move::Left {
        policy.gap_extend()
    } else {
        policy.gap_open()
    };
    let left = matrix.score(x, y - 1) as i64 + left_gap as i64;

    let up_gap = if matrix.direction(x - 1, y) == Move::Up {
        policy.gap_extend()
    } else {
        policy.gap_open()
    };
    let up = matrix.score(x - 1, y) as i64 + up_gap as i64;

    (diag, left, up)
}

/// Pick the winning candidate.
///
/// The comparison is nested, not a flat maximum: `diag` is weighed against
/// `left` first, and only the survivor is weighed against `up`. Ties keep
/// `diag` over either gap and `left` over `up`.
#[inline]
pub(crate) fn choose(diag: i64, left: i64, up: i64) -> (i64, Move) {
    if diag >= left {
        if diag >= up {
            (diag, Move::Diag)
        } else {
            (up, Move::Up)
        }
    } else if left >= up {
        (left, Move::Left)
    } else {
        (up, Move::Up)
    }
}

/// Follow move pointers from `(x, y)` until an [`Move::End`] cell.
///
/// Returns the operators in alignment order and the coordinates of the `End`
/// cell, which is not itself part of the alignment.
pub(crate) fn traceback(
    matrix: &AlignmentMatrix,
    query: &[u8],
    reference: &[u8],
    mut x: usize,
    mut y: usize,
) -> (Vec<AlignmentOperator>, usize, usize) {
    let mut ops = Vec::with_capacity(x + y);
    loop {
        match matrix.direction(x, y) {
            Move::End => break,
            Move::Diag => {
                ops.push(if query[x - 1] == reference[y - 1] {
                    AlignmentOperator::Match
                } else {
                    AlignmentOperator::Mismatch
                });
                x -= 1;
                y -= 1;
            }
            Move::Left => {
                ops.push(AlignmentOperator::Deletion);
                y -= 1;
            }
            Move::Up => {
                ops.push(AlignmentOperator::Insertion);
                x -= 1;
            }
        }
    }
    ops.reverse();
    (ops, x, y)
}
