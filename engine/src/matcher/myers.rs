//! Myers diff algorithm.
//!
//! O(ND) shortest edit script, then folded into the same opcode shape the
//! matching-blocks matcher produces: runs of deletes and inserts that touch
//! are reported as a single `Replace`.
use std::hash::Hash;

use crate::matcher::{DiffAlgorithm, DiffOp, DiffTag};

/// Myers diff algorithm.
#[derive(Debug, Clone, Copy, Default)]
pub struct MyersDiff;

impl MyersDiff {
    /// Creates new instance.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DiffAlgorithm for MyersDiff {
    fn diff<T: Eq + Hash>(&self, base: &[T], target: &[T]) -> Vec<DiffOp> {
        if base.is_empty() && target.is_empty() {
            return Vec::new();
        }
        if base.is_empty() {
            return vec![DiffOp::Insert {
                old: 0..0,
                new: 0..target.len(),
            }];
        }
        if target.is_empty() {
            return vec![DiffOp::Delete {
                old: 0..base.len(),
                new: 0..0,
            }];
        }
        convert_ses_to_diff_ops(&compute_ses(base, target))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EditOp {
    Insert,
    Delete,
    Keep,
}

pub(crate) fn compute_ses<T: Eq>(base: &[T], target: &[T]) -> Vec<EditOp> {
    let (n, m, max_d) = (base.len(), target.len(), base.len() + target.len());
    if n == 0 {
        return vec![EditOp::Insert; m];
    }
    if m == 0 {
        return vec![EditOp::Delete; n];
    }
    let mut v: Vec<isize> = vec![0; 2 * max_d + 1];
    let mut trace: Vec<Vec<isize>> = Vec::new();
    'outer: for d in 0..=max_d {
        trace.push(v.clone());
        let d = d as isize;
        for k in (-d..=d).step_by(2) {
            let k_idx = (k + max_d as isize) as usize;
            let x: isize = if k == -d || (k != d && v[k_idx - 1] < v[k_idx + 1]) {
                v[k_idx + 1]
            } else {
                v[k_idx - 1] + 1
            };
            let (mut x, mut y) = (x, x - k);
            while x < n as isize && y < m as isize && base[x as usize] == target[y as usize] {
                x += 1;
                y += 1;
            }
            v[k_idx] = x;
            if x >= n as isize && y >= m as isize {
                break 'outer;
            }
        }
    }
    backtrack(n, m, &trace, max_d)
}

fn backtrack(n: usize, m: usize, trace: &[Vec<isize>], max_d: usize) -> Vec<EditOp> {
    let (mut edits, mut x, mut y) = (Vec::new(), n, m);
    // trace[d] holds the frontier before step d, which decides how step d moved.
    for (d, v) in trace.iter().enumerate().skip(1).rev() {
        let (d, k) = (d as isize, x as isize - y as isize);
        let k_idx = (k + max_d as isize) as usize;
        let prev_k = if k == -d || (k != d && v[k_idx - 1] < v[k_idx + 1]) {
            k + 1
        } else {
            k - 1
        };
        let prev_x = v[(prev_k + max_d as isize) as usize];
        let (prev_x, prev_y) = (prev_x as usize, (prev_x - prev_k) as usize);
        while x > prev_x && y > prev_y {
            edits.push(EditOp::Keep);
            x -= 1;
            y -= 1;
        }
        if x > prev_x {
            edits.push(EditOp::Delete);
            x -= 1;
        } else if y > prev_y {
            edits.push(EditOp::Insert);
            y -= 1;
        }
    }
    while x > 0 && y > 0 {
        edits.push(EditOp::Keep);
        x -= 1;
        y -= 1;
    }
    while y > 0 {
        edits.push(EditOp::Insert);
        y -= 1;
    }
    while x > 0 {
        edits.push(EditOp::Delete);
        x -= 1;
    }
    edits.reverse();
    edits
}

/// Folds an edit script into opcodes.
///
/// Consecutive keeps become one `Equal`; a run of deletes and inserts between
/// two keeps becomes `Delete`, `Insert` or `Replace` depending on which sides
/// it touches.
pub(crate) fn convert_ses_to_diff_ops(ses: &[EditOp]) -> Vec<DiffOp> {
    let (mut ops, mut bi, mut ti) = (Vec::new(), 0, 0);
    let (mut run_old, mut run_new) = (0, 0);
    let flush = |ops: &mut Vec<DiffOp>, bi: usize, ti: usize, ro: usize, rn: usize| {
        let tag = match (ro < bi, rn < ti) {
            (true, true) => DiffTag::Replace,
            (true, false) => DiffTag::Delete,
            (false, true) => DiffTag::Insert,
            (false, false) => return,
        };
        ops.push(DiffOp::new(tag, ro..bi, rn..ti));
    };
    for edit in ses {
        match edit {
            EditOp::Keep => {
                flush(&mut ops, bi, ti, run_old, run_new);
                match ops.last_mut() {
                    Some(DiffOp::Equal { old, new }) if old.end == bi && new.end == ti => {
                        old.end = bi + 1;
                        new.end = ti + 1;
                    }
                    _ => ops.push(DiffOp::Equal {
                        old: bi..bi + 1,
                        new: ti..ti + 1,
                    }),
                }
                bi += 1;
                ti += 1;
                (run_old, run_new) = (bi, ti);
            }
            EditOp::Delete => bi += 1,
            EditOp::Insert => ti += 1,
        }
    }
    flush(&mut ops, bi, ti, run_old, run_new);
    ops
}
