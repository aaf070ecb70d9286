//! Groups line opcodes into hunks surrounded by context lines.

use std::ops::Range;

use tracing::trace;

use super::DiffOp;

/// A group of opcodes rendered under one `@@` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    ops: Vec<DiffOp>,
}

impl Hunk {
    /// Returns the opcodes of this hunk in document order.
    #[must_use]
    pub fn ops(&self) -> &[DiffOp] {
        &self.ops
    }

    /// Old line span covered by the hunk (0-based, half-open).
    #[must_use]
    pub fn old_span(&self) -> Range<usize> {
        match (self.ops.first(), self.ops.last()) {
            (Some(first), Some(last)) => first.old_range().start..last.old_range().end,
            _ => 0..0,
        }
    }

    /// New line span covered by the hunk (0-based, half-open).
    #[must_use]
    pub fn new_span(&self) -> Range<usize> {
        match (self.ops.first(), self.ops.last()) {
            (Some(first), Some(last)) => first.new_range().start..last.new_range().end,
            _ => 0..0,
        }
    }

    /// The `@@ -a,b +c,d @@` header text for this hunk.
    #[must_use]
    pub fn header(&self) -> String {
        let (old, new) = (self.old_span(), self.new_span());
        format!(
            "@@ -{},{} +{},{} @@",
            old.start + 1,
            old.len(),
            new.start + 1,
            new.len()
        )
    }
}

/// Splits opcodes into hunks with at most `context` unchanged lines around each change.
///
/// Equal runs longer than twice the context split the surrounding changes into
/// separate hunks. Returns no hunks when nothing changed.
#[must_use]
pub fn group_opcodes(ops: &[DiffOp], context: usize) -> Vec<Hunk> {
    if !ops.iter().any(DiffOp::is_change) {
        return Vec::new();
    }
    let mut codes = ops.to_vec();
    if let Some(DiffOp::Equal { old, new }) = codes.first_mut() {
        old.start = old.start.max(old.end.saturating_sub(context));
        new.start = new.start.max(new.end.saturating_sub(context));
    }
    if let Some(DiffOp::Equal { old, new }) = codes.last_mut() {
        old.end = old.end.min(old.start.saturating_add(context));
        new.end = new.end.min(new.start.saturating_add(context));
    }

    let mut hunks = Vec::new();
    let mut group: Vec<DiffOp> = Vec::new();
    for op in codes {
        match op {
            DiffOp::Equal { old, new } if old.len() > context.saturating_mul(2) => {
                group.push(DiffOp::Equal {
                    old: old.start..old.end.min(old.start.saturating_add(context)),
                    new: new.start..new.end.min(new.start.saturating_add(context)),
                });
                hunks.push(Hunk {
                    ops: std::mem::take(&mut group),
                });
                group.push(DiffOp::Equal {
                    old: old.start.max(old.end - context)..old.end,
                    new: new.start.max(new.end - context)..new.end,
                });
            }
            other => group.push(other),
        }
    }
    if !group.is_empty() && !(group.len() == 1 && !group[0].is_change()) {
        hunks.push(Hunk { ops: group });
    }
    trace!(hunks = hunks.len(), context, "grouped opcodes");
    hunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{DiffAlgorithm, blocks::MatchingBlocks};

    fn lines(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("line {i}")).collect()
    }

    #[test]
    fn test_no_changes_no_hunks() {
        let a = lines(10);
        let ops = MatchingBlocks.diff(&a, &a);
        assert!(group_opcodes(&ops, 3).is_empty());
        assert!(group_opcodes(&[], 3).is_empty());
    }

    #[test]
    fn test_single_change_gets_context() {
        let a = lines(20);
        let mut b = a.clone();
        b[10] = "changed".to_string();
        let hunks = group_opcodes(&MatchingBlocks.diff(&a, &b), 3);
        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks[0].old_span(), 7..14);
        assert_eq!(hunks[0].new_span(), 7..14);
        assert_eq!(hunks[0].header(), "@@ -8,7 +8,7 @@");
    }

    #[test]
    fn test_distant_changes_split_into_hunks() {
        let a = lines(40);
        let mut b = a.clone();
        b[5] = "first".to_string();
        b[30] = "second".to_string();
        let hunks = group_opcodes(&MatchingBlocks.diff(&a, &b), 3);
        assert_eq!(hunks.len(), 2);
        assert_eq!(hunks[0].old_span(), 2..9);
        assert_eq!(hunks[1].old_span(), 27..34);
    }

    #[test]
    fn test_close_changes_share_a_hunk() {
        let a = lines(20);
        let mut b = a.clone();
        b[5] = "first".to_string();
        b[9] = "second".to_string();
        let hunks = group_opcodes(&MatchingBlocks.diff(&a, &b), 3);
        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks[0].old_span(), 2..13);
    }

    #[test]
    fn test_zero_context() {
        let a = lines(5);
        let mut b = a.clone();
        b.insert(2, "new".to_string());
        let hunks = group_opcodes(&MatchingBlocks.diff(&a, &b), 0);
        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks[0].header(), "@@ -3,0 +3,1 @@");
    }
}
