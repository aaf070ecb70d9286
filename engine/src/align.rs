//! Pairing of old and new lines inside a replace block.
//!
//! Small blocks are aligned with an exact similarity-maximising dynamic
//! program. Blocks whose cell product exceeds [`MAX_DP_CELLS`] fall back to a
//! positional pairing driven by the line matcher, which keeps the cost linear
//! in practice.

use tracing::debug;

use crate::matcher::{DiffOp, SequenceMatcher};
use crate::similarity::ScoredLine;

/// Score charged for leaving one line unmatched.
pub const GAP_PENALTY: f64 = -0.35;

/// Minimum similarity for two lines to be shown as a changed pair.
pub const PAIR_THRESHOLD: f64 = 0.45;

/// Largest `old_len * new_len` aligned with the quadratic table.
pub const MAX_DP_CELLS: usize = 50_000;

/// One side of an alignment row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignedLine<'a> {
    /// 1-based line number in the full document.
    pub line_no: usize,
    /// Line text without terminator.
    pub text: &'a str,
}

/// One output row of the chunk aligner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentRow<'a> {
    /// Lines with identical text on both sides.
    Equal {
        /// Old side.
        old: AlignedLine<'a>,
        /// New side.
        new: AlignedLine<'a>,
    },
    /// Lines paired as an edit of each other.
    Replace {
        /// Old side.
        old: AlignedLine<'a>,
        /// New side.
        new: AlignedLine<'a>,
    },
    /// Old line with no counterpart.
    Delete(AlignedLine<'a>),
    /// New line with no counterpart.
    Insert(AlignedLine<'a>),
}

impl<'a> AlignmentRow<'a> {
    /// Old side of the row, if any.
    #[must_use]
    pub const fn old_side(&self) -> Option<AlignedLine<'a>> {
        match self {
            Self::Equal { old, .. } | Self::Replace { old, .. } | Self::Delete(old) => Some(*old),
            Self::Insert(_) => None,
        }
    }

    /// New side of the row, if any.
    #[must_use]
    pub const fn new_side(&self) -> Option<AlignedLine<'a>> {
        match self {
            Self::Equal { new, .. } | Self::Replace { new, .. } | Self::Insert(new) => Some(*new),
            Self::Delete(_) => None,
        }
    }
}

/// How a block is aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignStrategy {
    /// Exact dynamic programming over the full score table.
    Exact,
    /// Positional pairing from line-matcher opcodes.
    Positional,
}

impl AlignStrategy {
    /// Picks the strategy for a block of `old_len` by `new_len` lines.
    #[must_use]
    pub const fn for_block(old_len: usize, new_len: usize) -> Self {
        match old_len.checked_mul(new_len) {
            Some(cells) if cells <= MAX_DP_CELLS => Self::Exact,
            _ => Self::Positional,
        }
    }
}

/// Aligns a replace block.
///
/// `old_start` and `new_start` are the 0-based document indices of the first
/// line of each block; rows carry 1-based line numbers.
#[must_use]
pub fn align_replace_block<'a>(
    old_lines: &[&'a str],
    new_lines: &[&'a str],
    old_start: usize,
    new_start: usize,
) -> Vec<AlignmentRow<'a>> {
    let block = Block {
        old: old_lines,
        new: new_lines,
        old_start,
        new_start,
    };
    let strategy = AlignStrategy::for_block(old_lines.len(), new_lines.len());
    debug!(
        old_len = old_lines.len(),
        new_len = new_lines.len(),
        ?strategy,
        "aligning replace block"
    );
    match strategy {
        AlignStrategy::Exact => block.align_exact(),
        AlignStrategy::Positional => block.align_positional(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    End,
    Pair,
    Delete,
    Insert,
}

struct Block<'s, 'a> {
    old: &'s [&'a str],
    new: &'s [&'a str],
    old_start: usize,
    new_start: usize,
}

impl<'a> Block<'_, 'a> {
    fn old_line(&self, i: usize) -> AlignedLine<'a> {
        AlignedLine {
            line_no: self.old_start + i + 1,
            text: self.old[i],
        }
    }

    fn new_line(&self, j: usize) -> AlignedLine<'a> {
        AlignedLine {
            line_no: self.new_start + j + 1,
            text: self.new[j],
        }
    }

    fn pair(&self, i: usize, j: usize) -> AlignmentRow<'a> {
        let (old, new) = (self.old_line(i), self.new_line(j));
        if old.text == new.text {
            AlignmentRow::Equal { old, new }
        } else {
            AlignmentRow::Replace { old, new }
        }
    }

    /// Ties resolve pair, then delete, then insert.
    ///
    /// The table holds the best score of every pair of block suffixes and is
    /// walked forward from the first lines, so an unpaired run lists its old
    /// lines before its new ones.
    fn align_exact(&self) -> Vec<AlignmentRow<'a>> {
        let (n, m) = (self.old.len(), self.new.len());
        let old: Vec<ScoredLine<'_>> = self.old.iter().map(|line| ScoredLine::new(line)).collect();
        let new: Vec<ScoredLine<'_>> = self.new.iter().map(|line| ScoredLine::new(line)).collect();
        let width = m + 1;
        let mut dp = vec![0.0_f64; (n + 1) * width];
        let mut steps = vec![Step::End; (n + 1) * width];

        // Borders accumulate gap by gap, the same way interior cells do, so
        // equal-length unpaired runs tie exactly.
        for i in (0..n).rev() {
            dp[i * width + m] = dp[(i + 1) * width + m] + GAP_PENALTY;
            steps[i * width + m] = Step::Delete;
        }
        for j in (0..m).rev() {
            dp[n * width + j] = dp[n * width + j + 1] + GAP_PENALTY;
            steps[n * width + j] = Step::Insert;
        }

        for i in (0..n).rev() {
            for j in (0..m).rev() {
                let mut best = (f64::NEG_INFINITY, Step::Pair);
                if old[i].score_bound(&new[j]) >= PAIR_THRESHOLD {
                    let similarity = old[i].score(&new[j]);
                    if similarity >= PAIR_THRESHOLD {
                        best.0 = dp[(i + 1) * width + j + 1] + similarity;
                    }
                }
                let delete = dp[(i + 1) * width + j] + GAP_PENALTY;
                if delete > best.0 {
                    best = (delete, Step::Delete);
                }
                let insert = dp[i * width + j + 1] + GAP_PENALTY;
                if insert > best.0 {
                    best = (insert, Step::Insert);
                }
                dp[i * width + j] = best.0;
                steps[i * width + j] = best.1;
            }
        }

        let mut rows = Vec::with_capacity(n + m);
        let (mut i, mut j) = (0, 0);
        loop {
            match steps[i * width + j] {
                Step::End => break,
                Step::Pair => {
                    rows.push(self.pair(i, j));
                    i += 1;
                    j += 1;
                }
                Step::Delete => {
                    rows.push(AlignmentRow::Delete(self.old_line(i)));
                    i += 1;
                }
                Step::Insert => {
                    rows.push(AlignmentRow::Insert(self.new_line(j)));
                    j += 1;
                }
            }
        }
        rows
    }

    fn align_positional(&self) -> Vec<AlignmentRow<'a>> {
        let mut rows = Vec::with_capacity(self.old.len() + self.new.len());
        for op in SequenceMatcher::new(self.old, self.new).opcodes() {
            match op {
                DiffOp::Equal { old, new } | DiffOp::Replace { old, new } => {
                    let paired = old.len().min(new.len());
                    for k in 0..paired {
                        rows.push(self.pair(old.start + k, new.start + k));
                    }
                    rows.extend(
                        (old.start + paired..old.end).map(|i| AlignmentRow::Delete(self.old_line(i))),
                    );
                    rows.extend(
                        (new.start + paired..new.end).map(|j| AlignmentRow::Insert(self.new_line(j))),
                    );
                }
                DiffOp::Delete { old, .. } => {
                    rows.extend(old.map(|i| AlignmentRow::Delete(self.old_line(i))));
                }
                DiffOp::Insert { new, .. } => {
                    rows.extend(new.map(|j| AlignmentRow::Insert(self.new_line(j))));
                }
            }
        }
        rows
    }
}
