//! Core types for sequence alignment results.

use core::fmt;

use lodestar_core::{Scored, Summarizable};
#[cfg(feature = "serde")]
use lodestar_core::{LodestarError, Result};

/// The alignment strategy to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlignmentMode {
    /// Local alignment (Smith-Waterman): finds the best-scoring local region.
    Local,
    /// Global alignment (Needleman-Wunsch): aligns sequences end-to-end.
    Global,
}

impl fmt::Display for AlignmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlignmentMode::Local => f.write_str("local"),
            AlignmentMode::Global => f.write_str("global"),
        }
    }
}

/// A single alignment column.
///
/// `Insertion` consumes a query residue only (the query carries extra
/// sequence); `Deletion` consumes a reference residue only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlignmentOperator {
    /// Identical residues. Rendered `M`.
    Match,
    /// Differing residues. Rendered `S`.
    Mismatch,
    /// Query residue against a gap. Rendered `+`.
    Insertion,
    /// Reference residue against a gap. Rendered `-`.
    Deletion,
}

impl AlignmentOperator {
    /// Single-character code used in operator strings.
    pub fn code(&self) -> char {
        match self {
            AlignmentOperator::Match => 'M',
            AlignmentOperator::Mismatch => 'S',
            AlignmentOperator::Insertion => '+',
            AlignmentOperator::Deletion => '-',
        }
    }

    /// Inverse of [`code`](Self::code).
    pub fn from_code(c: char) -> Option<Self> {
        match c {
            'M' => Some(AlignmentOperator::Match),
            'S' => Some(AlignmentOperator::Mismatch),
            '+' => Some(AlignmentOperator::Insertion),
            '-' => Some(AlignmentOperator::Deletion),
            _ => None,
        }
    }

    /// SAM extended CIGAR code (`=`, `X`, `I`, `D`).
    pub fn cigar_code(&self) -> char {
        match self {
            AlignmentOperator::Match => '=',
            AlignmentOperator::Mismatch => 'X',
            AlignmentOperator::Insertion => 'I',
            AlignmentOperator::Deletion => 'D',
        }
    }

    /// Whether this operator consumes a query residue.
    pub fn consumes_query(&self) -> bool {
        !matches!(self, AlignmentOperator::Deletion)
    }

    /// Whether this operator consumes a reference residue.
    pub fn consumes_reference(&self) -> bool {
        !matches!(self, AlignmentOperator::Insertion)
    }

    /// The same column seen with query and reference exchanged.
    pub fn swapped(&self) -> Self {
        match self {
            AlignmentOperator::Insertion => AlignmentOperator::Deletion,
            AlignmentOperator::Deletion => AlignmentOperator::Insertion,
            op => *op,
        }
    }
}

impl fmt::Display for AlignmentOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// The result of a pairwise alignment.
///
/// Offsets are 0-based and half-open: the aligned query region is
/// `query_start..query_end`, the reference region `reference_start..reference_end`.
/// Global alignments always span both sequences in full.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawAlignment"))]
pub struct Alignment {
    operators: Vec<AlignmentOperator>,
    score: i32,
    query_start: usize,
    query_end: usize,
    reference_start: usize,
    reference_end: usize,
}

impl Alignment {
    pub(crate) fn new(
        operators: Vec<AlignmentOperator>,
        score: i32,
        query_start: usize,
        query_end: usize,
        reference_start: usize,
        reference_end: usize,
    ) -> Self {
        debug_assert!(query_start <= query_end && reference_start <= reference_end);
        Self {
            operators,
            score,
            query_start,
            query_end,
            reference_start,
            reference_end,
        }
    }

    /// The empty alignment (score 0, all offsets 0).
    pub(crate) fn empty() -> Self {
        Self::new(Vec::new(), 0, 0, 0, 0, 0)
    }

    /// Operators in alignment order.
    pub fn operators(&self) -> &[AlignmentOperator] {
        &self.operators
    }

    /// Raw alignment score.
    pub fn score(&self) -> i32 {
        self.score
    }

    /// First aligned query position (inclusive).
    pub fn query_start(&self) -> usize {
        self.query_start
    }

    /// End of the aligned query region (exclusive).
    pub fn query_end(&self) -> usize {
        self.query_end
    }

    /// First aligned reference position (inclusive).
    pub fn reference_start(&self) -> usize {
        self.reference_start
    }

    /// End of the aligned reference region (exclusive).
    pub fn reference_end(&self) -> usize {
        self.reference_end
    }

    /// Number of query residues covered (`query_end - query_start`).
    pub fn query_length(&self) -> usize {
        self.query_end - self.query_start
    }

    /// Number of reference residues covered (`reference_end - reference_start`).
    pub fn reference_length(&self) -> usize {
        self.reference_end - self.reference_start
    }

    /// Whether the alignment has no columns.
    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    /// Total number of alignment columns.
    pub fn length(&self) -> usize {
        self.operators.len()
    }

    /// One character per column, e.g. `"MMS+M"`.
    pub fn operator_string(&self) -> String {
        self.operators.iter().map(AlignmentOperator::code).collect()
    }

    /// Run-length encoded operators, in order.
    pub fn runs(&self) -> Vec<(AlignmentOperator, usize)> {
        let mut runs: Vec<(AlignmentOperator, usize)> = Vec::new();
        for &op in &self.operators {
            match runs.last_mut() {
                Some((last, n)) if *last == op => *n += 1,
                _ => runs.push((op, 1)),
            }
        }
        runs
    }

    /// Extended CIGAR string, e.g. `"4=1I3="`. Empty alignments give `"*"`.
    pub fn cigar_string(&self) -> String {
        if self.operators.is_empty() {
            return "*".into();
        }
        self.runs()
            .iter()
            .map(|(op, n)| format!("{}{}", n, op.cigar_code()))
            .collect()
    }

    /// Gapped rows for the aligned regions of `query` and `reference`.
    ///
    /// `query` and `reference` must be the sequences this alignment was
    /// computed from.
    pub fn aligned_sequences(&self, query: &[u8], reference: &[u8]) -> (Vec<u8>, Vec<u8>) {
        let mut q = Vec::with_capacity(self.operators.len());
        let mut r = Vec::with_capacity(self.operators.len());
        let mut qi = self.query_start;
        let mut ri = self.reference_start;
        for op in &self.operators {
            if op.consumes_query() {
                q.push(query[qi]);
                qi += 1;
            } else {
                q.push(b'-');
            }
            if op.consumes_reference() {
                r.push(reference[ri]);
                ri += 1;
            } else {
                r.push(b'-');
            }
        }
        (q, r)
    }

    fn count(&self, wanted: AlignmentOperator) -> usize {
        self.operators.iter().filter(|&&op| op == wanted).count()
    }

    /// Number of matching columns.
    pub fn matches(&self) -> usize {
        self.count(AlignmentOperator::Match)
    }

    /// Number of mismatching columns.
    pub fn mismatches(&self) -> usize {
        self.count(AlignmentOperator::Mismatch)
    }

    /// Number of insertion columns (query residue against a gap).
    pub fn insertions(&self) -> usize {
        self.count(AlignmentOperator::Insertion)
    }

    /// Number of deletion columns (reference residue against a gap).
    pub fn deletions(&self) -> usize {
        self.count(AlignmentOperator::Deletion)
    }

    /// Number of gap columns (insertions + deletions).
    pub fn gaps(&self) -> usize {
        self.insertions() + self.deletions()
    }

    /// Fraction of columns that are exact matches, in `[0.0, 1.0]`.
    ///
    /// Returns 0.0 if the alignment is empty.
    pub fn identity(&self) -> f64 {
        if self.operators.is_empty() {
            return 0.0;
        }
        self.matches() as f64 / self.operators.len() as f64
    }
}

/// Unvalidated wire form; deserialization checks the offsets against the operators.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawAlignment {
    operators: Vec<AlignmentOperator>,
    score: i32,
    query_start: usize,
    query_end: usize,
    reference_start: usize,
    reference_end: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawAlignment> for Alignment {
    type Error = LodestarError;

    fn try_from(raw: RawAlignment) -> Result<Self> {
        if raw.query_end < raw.query_start {
            return Err(LodestarError::InvalidArgument(format!(
                "query_end {} precedes query_start {}",
                raw.query_end, raw.query_start
            )));
        }
        if raw.reference_end < raw.reference_start {
            return Err(LodestarError::InvalidArgument(format!(
                "reference_end {} precedes reference_start {}",
                raw.reference_end, raw.reference_start
            )));
        }

        let query_consumed = raw.operators.iter().filter(|op| op.consumes_query()).count();
        if query_consumed != raw.query_end - raw.query_start {
            return Err(LodestarError::InvalidArgument(format!(
                "operators consume {} query residues but offsets span {}..{}",
                query_consumed, raw.query_start, raw.query_end
            )));
        }
        let reference_consumed = raw
            .operators
            .iter()
            .filter(|op| op.consumes_reference())
            .count();
        if reference_consumed != raw.reference_end - raw.reference_start {
            return Err(LodestarError::InvalidArgument(format!(
                "operators consume {} reference residues but offsets span {}..{}",
                reference_consumed, raw.reference_start, raw.reference_end
            )));
        }

        Ok(Alignment::new(
            raw.operators,
            raw.score,
            raw.query_start,
            raw.query_end,
            raw.reference_start,
            raw.reference_end,
        ))
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.operator_string())
    }
}

impl Scored for Alignment {
    fn score(&self) -> f64 {
        self.score as f64
    }
}

impl Summarizable for Alignment {
    fn summary(&self) -> String {
        format!(
            "score={} query={}..{} reference={}..{} cigar={}",
            self.score,
            self.query_start,
            self.query_end,
            self.reference_start,
            self.reference_end,
            self.cigar_string()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AlignmentOperator::*;

    fn sample() -> Alignment {
        // query  ACG-TT
        // ref    AGGCT-
        Alignment::new(
            vec![Match, Mismatch, Match, Deletion, Match, Insertion],
            -9,
            2,
            7,
            1,
            6,
        )
    }

    #[test]
    fn operator_codes_round_trip() {
        for op in [Match, Mismatch, Insertion, Deletion] {
            assert_eq!(AlignmentOperator::from_code(op.code()), Some(op));
        }
        assert_eq!(AlignmentOperator::from_code('X'), None);
    }

    #[test]
    fn operator_string_uses_fixed_mapping() {
        assert_eq!(sample().operator_string(), "MSM-M+");
        assert_eq!(sample().to_string(), "MSM-M+");
    }

    #[test]
    fn consumption_rules() {
        assert!(Match.consumes_query() && Match.consumes_reference());
        assert!(Mismatch.consumes_query() && Mismatch.consumes_reference());
        assert!(Insertion.consumes_query() && !Insertion.consumes_reference());
        assert!(!Deletion.consumes_query() && Deletion.consumes_reference());
    }

    #[test]
    fn swapped_exchanges_gaps_only() {
        assert_eq!(Insertion.swapped(), Deletion);
        assert_eq!(Deletion.swapped(), Insertion);
        assert_eq!(Match.swapped(), Match);
        assert_eq!(Mismatch.swapped(), Mismatch);
    }

    #[test]
    fn lengths_and_counts() {
        let a = sample();
        assert_eq!(a.query_length(), 5);
        assert_eq!(a.reference_length(), 5);
        assert_eq!(a.length(), 6);
        assert_eq!(a.matches(), 3);
        assert_eq!(a.mismatches(), 1);
        assert_eq!(a.insertions(), 1);
        assert_eq!(a.deletions(), 1);
        assert_eq!(a.gaps(), 2);
        assert!((a.identity() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn cigar_merges_runs() {
        let a = Alignment::new(vec![Match, Match, Insertion, Insertion, Match], 0, 0, 5, 0, 3);
        assert_eq!(a.cigar_string(), "2=2I1=");
        assert_eq!(a.runs(), vec![(Match, 2), (Insertion, 2), (Match, 1)]);
    }

    #[test]
    fn empty_alignment() {
        let a = Alignment::empty();
        assert!(a.is_empty());
        assert_eq!(a.score(), 0);
        assert_eq!(a.operator_string(), "");
        assert_eq!(a.cigar_string(), "*");
        assert_eq!(a.identity(), 0.0);
        assert_eq!(a.query_length(), 0);
    }

    #[test]
    fn aligned_sequences_respect_offsets() {
        let (q, r) = sample().aligned_sequences(b"xxACGTTyy", b"xAGGCTz");
        assert_eq!(q, b"ACG-TT");
        assert_eq!(r, b"AGGCT-");
    }

    #[test]
    fn scored_and_summary() {
        let a = sample();
        assert!((Scored::score(&a) + 9.0).abs() < f64::EPSILON);
        assert_eq!(a.summary(), "score=-9 query=2..7 reference=1..6 cigar=1=1X1=1D1=1I");
    }
}
