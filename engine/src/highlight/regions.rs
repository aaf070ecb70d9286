//! Raw change regions from a character-level comparison.

use std::ops::Range;

use crate::matcher::{DiffOp, SequenceMatcher};
use crate::similarity::is_word_char;

/// Collects the changed spans of each side from the character opcodes.
///
/// Replacements mark both sides, deletions only the old side. Insertions mark
/// the new side and leave a zero-length anchor on the old side unless the
/// insertion point touches a word there.
pub(super) fn raw_regions(old: &[char], new: &[char]) -> (Vec<Range<usize>>, Vec<Range<usize>>) {
    let (mut old_regions, mut new_regions) = (Vec::new(), Vec::new());
    for op in SequenceMatcher::new(old, new).opcodes() {
        match op {
            DiffOp::Equal { .. } => {}
            DiffOp::Delete { old: removed, .. } => old_regions.push(removed),
            DiffOp::Insert { old: at, new: added } => {
                if !touches_word(old, at.start) {
                    old_regions.push(at.clone());
                }
                new_regions.push(trim_borrowed(new, added, old, &at));
            }
            DiffOp::Replace {
                old: removed,
                new: added,
            } => {
                old_regions.push(trim_borrowed(old, removed.clone(), new, &added));
                new_regions.push(trim_borrowed(new, added, old, &removed));
            }
        }
    }
    (old_regions, new_regions)
}

/// True when a word character sits directly before or after `at`.
fn touches_word(text: &[char], at: usize) -> bool {
    let before = at.checked_sub(1).and_then(|i| text.get(i)).copied();
    let after = text.get(at).copied();
    before.is_some_and(is_word_char) || after.is_some_and(is_word_char)
}

/// Shrinks `region` of `text` by the fragments it shares with the unchanged
/// context around `counterpart` in `other`.
///
/// The leading edge is compared with the characters following the
/// counterpart, the trailing edge with the characters preceding it. Trimming
/// stops at the first mismatch or whitespace. A fully trimmed region collapses
/// to an anchor at its trimmed position.
fn trim_borrowed(
    text: &[char],
    region: Range<usize>,
    other: &[char],
    counterpart: &Range<usize>,
) -> Range<usize> {
    let (mut start, mut end) = (region.start, region.end);

    let mut k = counterpart.end;
    while start < end && k < other.len() && text[start] == other[k] && !text[start].is_whitespace()
    {
        start += 1;
        k += 1;
    }

    let mut k = counterpart.start;
    while start < end && k > 0 && text[end - 1] == other[k - 1] && !text[end - 1].is_whitespace() {
        end -= 1;
        k -= 1;
    }

    start..end
}
