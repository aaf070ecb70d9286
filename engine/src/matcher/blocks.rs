//! Longest-matching-blocks sequence matcher.
//!
//! Ratcliff/Obershelp style matching: find the longest common contiguous run,
//! then recurse into the unmatched pieces on either side. Unlike the classic
//! difflib matcher there is no junk or "popular element" heuristic, so
//! frequently repeated elements (spaces, braces, blank lines) always take part
//! in matching.

use std::collections::HashMap;
use std::hash::Hash;

use super::{DiffAlgorithm, DiffOp, DiffTag};

/// A run of `size` equal elements starting at `a[old]` and `b[new]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Match {
    /// Start index in the old sequence.
    pub old: usize,
    /// Start index in the new sequence.
    pub new: usize,
    /// Length of the run.
    pub size: usize,
}

/// Matcher over a pair of sequences.
///
/// Construction indexes the new sequence once; every query afterwards reuses
/// that index.
#[derive(Debug)]
pub struct SequenceMatcher<'a, T> {
    a: &'a [T],
    b: &'a [T],
    b2j: HashMap<&'a T, Vec<usize>>,
}

impl<'a, T: Eq + Hash> SequenceMatcher<'a, T> {
    /// Creates a matcher for `a` (old) against `b` (new).
    #[must_use]
    pub fn new(a: &'a [T], b: &'a [T]) -> Self {
        let mut b2j: HashMap<&'a T, Vec<usize>> = HashMap::new();
        for (j, elt) in b.iter().enumerate() {
            b2j.entry(elt).or_default().push(j);
        }
        Self { a, b, b2j }
    }

    /// Finds the longest matching run inside `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Among equally long runs the one starting earliest in `a` wins, and among
    /// those the one starting earliest in `b`. Returns a zero-size match at
    /// `(alo, blo)` when the ranges share no element.
    #[must_use]
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Match {
        let mut best = Match {
            old: alo,
            new: blo,
            size: 0,
        };
        if alo >= ahi || blo >= bhi {
            return best;
        }
        // Run length ending at `b[j]` lives in slot `j - blo + 1`; slot 0 stays
        // zero for runs that would start before `blo`.
        let slots = bhi - blo + 1;
        let (mut j2len, mut next) = (vec![0usize; slots], vec![0usize; slots]);
        let (mut written, mut next_written) = (Vec::new(), Vec::new());
        for i in alo..ahi {
            if let Some(indices) = self.b2j.get(&self.a[i]) {
                for &j in indices {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j2len[j - blo] + 1;
                    next[j - blo + 1] = k;
                    next_written.push(j - blo + 1);
                    if k > best.size {
                        best = Match {
                            old: i + 1 - k,
                            new: j + 1 - k,
                            size: k,
                        };
                    }
                }
            }
            for slot in written.drain(..) {
                j2len[slot] = 0;
            }
            std::mem::swap(&mut j2len, &mut next);
            std::mem::swap(&mut written, &mut next_written);
        }
        best
    }

    /// Returns the non-adjacent matching runs in increasing order.
    ///
    /// The list always ends with the sentinel `Match { old: a.len(), new: b.len(), size: 0 }`.
    #[must_use]
    pub fn matching_blocks(&self) -> Vec<Match> {
        let (la, lb) = (self.a.len(), self.b.len());
        let mut queue = vec![(0, la, 0, lb)];
        let mut found = Vec::new();
        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let m = self.find_longest_match(alo, ahi, blo, bhi);
            if m.size == 0 {
                continue;
            }
            if alo < m.old && blo < m.new {
                queue.push((alo, m.old, blo, m.new));
            }
            if m.old + m.size < ahi && m.new + m.size < bhi {
                queue.push((m.old + m.size, ahi, m.new + m.size, bhi));
            }
            found.push(m);
        }
        found.sort_unstable();

        let mut collapsed: Vec<Match> = Vec::with_capacity(found.len() + 1);
        for m in found {
            match collapsed.last_mut() {
                Some(last) if last.old + last.size == m.old && last.new + last.size == m.new => {
                    last.size += m.size;
                }
                _ => collapsed.push(m),
            }
        }
        collapsed.push(Match {
            old: la,
            new: lb,
            size: 0,
        });
        collapsed
    }

    /// Number of elements covered by matching runs.
    #[must_use]
    pub fn matched_len(&self) -> usize {
        self.matching_blocks().iter().map(|m| m.size).sum()
    }

    /// Similarity in `[0, 1]`: `2 * matched / (len_a + len_b)`.
    ///
    /// Two empty sequences are identical and score `1.0`.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        let total = self.a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        2.0 * self.matched_len() as f64 / total as f64
    }

    /// Returns the opcodes describing how to turn `a` into `b`.
    #[must_use]
    pub fn opcodes(&self) -> Vec<DiffOp> {
        let (mut i, mut j) = (0, 0);
        let mut ops = Vec::new();
        for m in self.matching_blocks() {
            let tag = match (i < m.old, j < m.new) {
                (true, true) => Some(DiffTag::Replace),
                (true, false) => Some(DiffTag::Delete),
                (false, true) => Some(DiffTag::Insert),
                (false, false) => None,
            };
            if let Some(tag) = tag {
                ops.push(DiffOp::new(tag, i..m.old, j..m.new));
            }
            i = m.old + m.size;
            j = m.new + m.size;
            if m.size > 0 {
                ops.push(DiffOp::Equal {
                    old: m.old..i,
                    new: m.new..j,
                });
            }
        }
        ops
    }
}

/// [`DiffAlgorithm`] adapter over [`SequenceMatcher`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchingBlocks;

impl DiffAlgorithm for MatchingBlocks {
    fn diff<T: Eq + Hash>(&self, base: &[T], target: &[T]) -> Vec<DiffOp> {
        SequenceMatcher::new(base, target).opcodes()
    }
}
