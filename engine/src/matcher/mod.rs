//! Sequence matchers and the opcode types they produce.
//!
//! Both matchers implement [`DiffAlgorithm`] and produce the same opcode
//! shape, so the hunk grouper and the chunk aligner can consume either.

pub mod blocks;
pub mod grouping;
pub mod myers;

use std::hash::Hash;
use std::ops::Range;

use serde::Deserialize;

pub use blocks::{Match, SequenceMatcher};
pub use grouping::{Hunk, group_opcodes};
pub use myers::MyersDiff;

/// A single diff operation mapping a span of the old sequence to a span of the new one.
///
/// Every variant carries both ranges. For `Delete` the new range is empty and
/// sits at the position where the deleted span would have been; `Insert`
/// mirrors that on the old side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOp {
    /// Elements that are unchanged between both sequences.
    Equal {
        /// Range in the old sequence (0-based, half-open).
        old: Range<usize>,
        /// Range in the new sequence (0-based, half-open).
        new: Range<usize>,
    },
    /// Elements that exist only in the old sequence.
    Delete {
        /// Range in the old sequence (0-based, half-open).
        old: Range<usize>,
        /// Empty range in the new sequence marking the deletion point.
        new: Range<usize>,
    },
    /// Elements that exist only in the new sequence.
    Insert {
        /// Empty range in the old sequence marking the insertion point.
        old: Range<usize>,
        /// Range in the new sequence (0-based, half-open).
        new: Range<usize>,
    },
    /// Elements that were replaced (deleted and inserted).
    Replace {
        /// Range in the old sequence (0-based, half-open).
        old: Range<usize>,
        /// Range in the new sequence (0-based, half-open).
        new: Range<usize>,
    },
}

impl DiffOp {
    /// Builds an opcode from its tag and the two ranges.
    #[must_use]
    pub fn new(tag: DiffTag, old: Range<usize>, new: Range<usize>) -> Self {
        match tag {
            DiffTag::Equal => Self::Equal { old, new },
            DiffTag::Delete => Self::Delete { old, new },
            DiffTag::Insert => Self::Insert { old, new },
            DiffTag::Replace => Self::Replace { old, new },
        }
    }

    /// Returns the tag of this operation.
    #[must_use]
    pub const fn tag(&self) -> DiffTag {
        match self {
            Self::Equal { .. } => DiffTag::Equal,
            Self::Delete { .. } => DiffTag::Delete,
            Self::Insert { .. } => DiffTag::Insert,
            Self::Replace { .. } => DiffTag::Replace,
        }
    }

    /// Returns the range of elements covered in the old sequence.
    #[must_use]
    pub fn old_range(&self) -> Range<usize> {
        match self {
            Self::Equal { old, .. }
            | Self::Delete { old, .. }
            | Self::Insert { old, .. }
            | Self::Replace { old, .. } => old.clone(),
        }
    }

    /// Returns the range of elements covered in the new sequence.
    #[must_use]
    pub fn new_range(&self) -> Range<usize> {
        match self {
            Self::Equal { new, .. }
            | Self::Delete { new, .. }
            | Self::Insert { new, .. }
            | Self::Replace { new, .. } => new.clone(),
        }
    }

    /// Returns true if this operation represents a change (not equal).
    #[must_use]
    pub const fn is_change(&self) -> bool {
        !matches!(self, Self::Equal { .. })
    }

    /// Returns the number of old elements covered.
    #[must_use]
    pub fn old_len(&self) -> usize {
        self.old_range().len()
    }

    /// Returns the number of new elements covered.
    #[must_use]
    pub fn new_len(&self) -> usize {
        self.new_range().len()
    }
}

/// The kind of a [`DiffOp`], without its ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiffTag {
    /// Unchanged span.
    Equal,
    /// Span removed from the old sequence.
    Delete,
    /// Span added in the new sequence.
    Insert,
    /// Span replaced by a different span.
    Replace,
}

/// Trait for diff algorithms.
///
/// Implementations return opcodes that cover both sequences completely and in
/// order: concatenating the old ranges yields `0..base.len()` and likewise for
/// the new ranges.
pub trait DiffAlgorithm: Send + Sync {
    /// Computes the opcodes transforming `base` into `target`.
    fn diff<T: Eq + Hash>(&self, base: &[T], target: &[T]) -> Vec<DiffOp>;
}

/// Line matcher selected for hunk grouping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineAlgorithm {
    /// Longest-matching-blocks matcher ([`SequenceMatcher`]).
    #[default]
    MatchingBlocks,
    /// Myers shortest edit script ([`MyersDiff`]).
    Myers,
}

impl LineAlgorithm {
    /// Runs the selected matcher over two line sequences.
    #[must_use]
    pub fn diff_lines(self, old: &[&str], new: &[&str]) -> Vec<DiffOp> {
        match self {
            Self::MatchingBlocks => blocks::MatchingBlocks.diff(old, new),
            Self::Myers => MyersDiff::new().diff(old, new),
        }
    }
}

impl std::str::FromStr for LineAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "matching-blocks" => Ok(Self::MatchingBlocks),
            "myers" => Ok(Self::Myers),
            other => Err(format!("unknown line algorithm: {other}")),
        }
    }
}
