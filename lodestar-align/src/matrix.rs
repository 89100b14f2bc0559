//! Dense dynamic-programming matrix with packed `(score, move)` cells.
//!
//! Each cell is a single `i32`: the traceback [`Move`] lives in the low two
//! bits and the score in the remaining thirty, so reading or writing a cell is
//! a shift and a mask with no per-cell allocation. Scores are therefore bounded
//! by [`MIN_SCORE`] and [`MAX_SCORE`]; [`AlignmentMatrix::set`] refuses values
//! outside that range instead of letting them wrap into the move bits.

use core::fmt::Write as _;

use lodestar_core::{LodestarError, Result};

/// Number of low bits reserved for the move.
const MOVE_BITS: u32 = 2;
const MOVE_MASK: i32 = (1 << MOVE_BITS) - 1;

/// Smallest score a cell can hold.
pub const MIN_SCORE: i64 = (i32::MIN >> MOVE_BITS) as i64;
/// Largest score a cell can hold.
pub const MAX_SCORE: i64 = (i32::MAX >> MOVE_BITS) as i64;

/// Traceback direction recorded for a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Move {
    /// Matrix origin (global) or local-alignment restart.
    End = 0,
    /// Consumed one residue from each sequence.
    Diag = 1,
    /// Consumed one reference residue (gap in the query).
    Left = 2,
    /// Consumed one query residue (gap in the reference).
    Up = 3,
}

impl Move {
    #[inline]
    fn from_bits(bits: i32) -> Self {
        match bits & MOVE_MASK {
            0 => Move::End,
            1 => Move::Diag,
            2 => Move::Left,
            _ => Move::Up,
        }
    }

    /// Glyph used by [`AlignmentMatrix::render`].
    pub fn glyph(&self) -> char {
        match self {
            Move::End => '.',
            Move::Diag => '\\',
            Move::Left => '<',
            Move::Up => '^',
        }
    }
}

/// An unpacked matrix cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub score: i32,
    pub direction: Move,
}

/// A `(|query| + 1) × (|reference| + 1)` table of packed cells, row-major.
///
/// Rows are indexed by query position `x`, columns by reference position `y`.
/// Every cell starts as `(0, End)`.
#[derive(Debug, Clone)]
pub struct AlignmentMatrix {
    cells: Vec<i32>,
    rows: usize,
    cols: usize,
}

impl AlignmentMatrix {
    /// Allocate a zeroed matrix with the given dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`LodestarError::ArithmeticOverflow`] if `rows * cols` does not
    /// fit in `usize`.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let len = rows.checked_mul(cols).ok_or_else(|| {
            LodestarError::ArithmeticOverflow(format!(
                "matrix of {rows} x {cols} cells exceeds addressable size"
            ))
        })?;
        Ok(Self {
            cells: vec![0; len],
            rows,
            cols,
        })
    }

    /// Allocate a matrix sized for aligning `query` against `reference`.
    pub fn for_sequences(query: &[u8], reference: &[u8]) -> Result<Self> {
        Self::new(query.len() + 1, reference.len() + 1)
    }

    /// Number of rows (`|query| + 1`).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (`|reference| + 1`).
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.rows && y < self.cols, "cell ({x}, {y}) out of bounds");
        x * self.cols + y
    }

    /// Read and unpack cell `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the matrix.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Cell {
        let packed = self.cells[self.idx(x, y)];
        Cell {
            score: packed >> MOVE_BITS,
            direction: Move::from_bits(packed),
        }
    }

    /// Score stored at `(x, y)`.
    #[inline]
    pub fn score(&self, x: usize, y: usize) -> i32 {
        self.cells[self.idx(x, y)] >> MOVE_BITS
    }

    /// Move stored at `(x, y)`.
    #[inline]
    pub fn direction(&self, x: usize, y: usize) -> Move {
        Move::from_bits(self.cells[self.idx(x, y)])
    }

    /// Pack and store `(score, direction)` at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`LodestarError::ArithmeticOverflow`] if `score` lies outside
    /// `[MIN_SCORE, MAX_SCORE]`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the matrix.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, score: i64, direction: Move) -> Result<()> {
        if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            return Err(LodestarError::ArithmeticOverflow(format!(
                "score {score} at cell ({x}, {y}) outside packable range [{MIN_SCORE}, {MAX_SCORE}]"
            )));
        }
        let i = self.idx(x, y);
        self.cells[i] = ((score as i32) << MOVE_BITS) | direction as i32;
        Ok(())
    }

    /// Human-readable dump of the matrix for diagnostics.
    ///
    /// The header row lists the reference residues, each following row starts
    /// with its query residue, and each cell is printed as its score followed
    /// by the move glyph (`.` end, `\` diag, `<` left, `^` up). Sequences
    /// shorter than the matrix dimensions are labelled with `?`.
    pub fn render(&self, query: &[u8], reference: &[u8]) -> String {
        let width = (0..self.rows)
            .flat_map(|x| (0..self.cols).map(move |y| (x, y)))
            .map(|(x, y)| self.score(x, y).to_string().len())
            .max()
            .unwrap_or(1)
            + 1;

        let label = |seq: &[u8], i: usize| -> char {
            seq.get(i).map(|&b| b as char).unwrap_or('?')
        };

        let mut out = String::new();
        let _ = write!(out, "  {:>w$}", "", w = width + 1);
        for y in 1..self.cols {
            let _ = write!(out, " {:>w$}", label(reference, y - 1), w = width + 1);
        }
        out.push('\n');

        for x in 0..self.rows {
            let head = if x == 0 { ' ' } else { label(query, x - 1) };
            out.push(head);
            out.push(' ');
            for y in 0..self.cols {
                let cell = self.get(x, y);
                if y > 0 {
                    out.push(' ');
                }
                let _ = write!(out, "{:>w$}{}", cell.score, cell.direction.glyph(), w = width);
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_matrix_is_zero_end() {
        let m = AlignmentMatrix::new(3, 4).unwrap();
        assert_eq!(m.rows(), 3);
        assert_eq!(m.cols(), 4);
        for x in 0..3 {
            for y in 0..4 {
                assert_eq!(m.get(x, y), Cell { score: 0, direction: Move::End });
            }
        }
    }

    #[test]
    fn set_get_every_move_with_signed_scores() {
        let mut m = AlignmentMatrix::new(2, 2).unwrap();
        let cases = [
            (0, 0, -7, Move::Diag),
            (0, 1, 12, Move::Left),
            (1, 0, -1, Move::Up),
            (1, 1, 0, Move::End),
        ];
        for &(x, y, s, d) in &cases {
            m.set(x, y, s, d).unwrap();
        }
        for &(x, y, s, d) in &cases {
            assert_eq!(m.score(x, y) as i64, s);
            assert_eq!(m.direction(x, y), d);
        }
    }

    #[test]
    fn extremes_fit() {
        let mut m = AlignmentMatrix::new(1, 2).unwrap();
        m.set(0, 0, MIN_SCORE, Move::Up).unwrap();
        m.set(0, 1, MAX_SCORE, Move::Left).unwrap();
        assert_eq!(m.get(0, 0), Cell { score: MIN_SCORE as i32, direction: Move::Up });
        assert_eq!(m.get(0, 1), Cell { score: MAX_SCORE as i32, direction: Move::Left });
    }

    #[test]
    fn out_of_range_scores_fail_fast() {
        let mut m = AlignmentMatrix::new(1, 1).unwrap();
        assert!(matches!(
            m.set(0, 0, MAX_SCORE + 1, Move::Diag),
            Err(LodestarError::ArithmeticOverflow(_))
        ));
        assert!(matches!(
            m.set(0, 0, MIN_SCORE - 1, Move::Diag),
            Err(LodestarError::ArithmeticOverflow(_))
        ));
        // failed writes leave the cell untouched
        assert_eq!(m.get(0, 0), Cell { score: 0, direction: Move::End });
    }

    #[test]
    fn dimension_overflow_is_rejected() {
        assert!(matches!(
            AlignmentMatrix::new(usize::MAX, 2),
            Err(LodestarError::ArithmeticOverflow(_))
        ));
    }

    #[test]
    fn render_labels_rows_and_columns() {
        let mut m = AlignmentMatrix::for_sequences(b"A", b"AC").unwrap();
        m.set(0, 1, -6, Move::Left).unwrap();
        m.set(0, 2, -12, Move::Left).unwrap();
        m.set(1, 0, -6, Move::Up).unwrap();
        m.set(1, 1, 1, Move::Diag).unwrap();
        m.set(1, 2, -5, Move::Left).unwrap();

        let text = m.render(b"A", b"AC");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains('A') && lines[0].contains('C'));
        assert!(lines[1].contains("-12<"));
        assert!(lines[2].starts_with('A'));
        assert!(lines[2].contains("1\\"));
        assert!(lines[2].contains("-6^"));
    }
}
