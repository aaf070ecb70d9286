//! Word-boundary expansion and gap merging of change regions.

use std::ops::Range;

use crate::similarity::is_word_char;

/// Largest gap, in characters, that may be bridged when merging regions.
pub(super) const MERGE_GAP: usize = 5;

/// Largest number of non-whitespace characters in a bridgeable gap.
pub(super) const MERGE_GAP_SYMBOLS: usize = 2;

fn is_blank(text: &[char], region: &Range<usize>) -> bool {
    text[region.clone()].iter().all(|c| c.is_whitespace())
}

/// Grows a region so it never splits a word.
///
/// Whitespace-only regions only absorb neighbouring whitespace. Anchors move
/// forward to the next word starting at or after them, or vanish.
pub(super) fn expand(text: &[char], region: Range<usize>) -> Option<Range<usize>> {
    if region.is_empty() {
        return expand_anchor(text, region.start);
    }
    let grow_over: fn(char) -> bool = if is_blank(text, &region) {
        char::is_whitespace
    } else {
        is_word_char
    };
    let (mut start, mut end) = (region.start, region.end);
    while start > 0 && grow_over(text[start - 1]) {
        start -= 1;
    }
    while end < text.len() && grow_over(text[end]) {
        end += 1;
    }
    Some(start..end)
}

fn expand_anchor(text: &[char], at: usize) -> Option<Range<usize>> {
    let start = (at..text.len())
        .find(|&q| is_word_char(text[q]) && (q == 0 || !is_word_char(text[q - 1])))?;
    let end = (start..text.len())
        .find(|&q| !is_word_char(text[q]))
        .unwrap_or(text.len());
    Some(start..end)
}

/// True when the text between two regions is connective filler.
///
/// Filler is all whitespace, or at most two non-alphanumeric symbols once
/// whitespace is removed.
fn is_small_gap(gap: &[char]) -> bool {
    let symbols: Vec<char> = gap.iter().copied().filter(|c| !c.is_whitespace()).collect();
    symbols.is_empty()
        || (symbols.len() <= MERGE_GAP_SYMBOLS && !symbols.iter().any(|c| c.is_alphanumeric()))
}

fn should_merge(text: &[char], last: &Range<usize>, next: &Range<usize>) -> bool {
    if next.start <= last.end {
        return true;
    }
    let gap = &text[last.end..next.start];
    if gap.len() > MERGE_GAP {
        return false;
    }
    if is_blank(text, last) && is_blank(text, next) {
        // Bridging a symbol would turn two space-only edits into a content edit.
        return gap.iter().all(|c| c.is_whitespace());
    }
    is_small_gap(gap)
}

/// Sorts regions and merges neighbours that overlap, touch, or are separated
/// only by small filler gaps.
pub(super) fn merge(text: &[char], mut regions: Vec<Range<usize>>) -> Vec<Range<usize>> {
    regions.sort_by_key(|r| (r.start, r.end));
    let mut merged: Vec<Range<usize>> = Vec::with_capacity(regions.len());
    for region in regions {
        match merged.last_mut() {
            Some(last) if should_merge(text, last, &region) => {
                last.end = last.end.max(region.end);
            }
            _ => merged.push(region),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_expand_to_whole_word() {
        let text = chars("let counter = 1;");
        assert_eq!(expand(&text, 6..8), Some(4..11));
    }

    #[test]
    fn test_blank_region_does_not_swallow_words() {
        let text = chars("a + b");
        assert_eq!(expand(&text, 1..2), Some(1..2));
        let text = chars("a  +b");
        assert_eq!(expand(&text, 1..2), Some(1..3));
    }

    #[test]
    fn test_anchor_moves_to_next_word() {
        let text = chars("f() + g");
        assert_eq!(expand(&text, 2..2), Some(6..7));
        assert_eq!(expand(&chars("f()"), 2..2), None);
    }

    #[test]
    fn test_anchor_inside_word_skips_to_next_word() {
        let text = chars("abc def");
        assert_eq!(expand(&text, 1..1), Some(4..7));
        assert_eq!(expand(&text, 0..0), Some(0..3));
    }

    #[test]
    fn test_small_gap() {
        assert!(is_small_gap(&chars("  ")));
        assert!(is_small_gap(&chars(", ")));
        assert!(is_small_gap(&chars(" -> ")));
        assert!(!is_small_gap(&chars(" a ")));
        assert!(!is_small_gap(&chars("...")));
    }

    #[test]
    fn test_merge_across_comma() {
        let text = chars("alpha, beta");
        assert_eq!(merge(&text, vec![7..11, 0..5]), vec![0..11]);
    }

    #[test]
    fn test_no_merge_across_word_or_long_gap() {
        let text = chars("one two three");
        assert_eq!(merge(&text, vec![0..3, 8..13]), vec![0..3, 8..13]);
        let text = chars("x       y");
        assert_eq!(merge(&text, vec![0..1, 8..9]), vec![0..1, 8..9]);
    }

    #[test]
    fn test_blank_regions_keep_apart_across_symbol() {
        let text = chars("a + b");
        assert_eq!(merge(&text, vec![1..2, 3..4]), vec![1..2, 3..4]);
    }

    #[test]
    fn test_overlapping_and_adjacent_merge() {
        let text = chars("abcdefgh");
        assert_eq!(merge(&text, vec![0..3, 2..5, 5..6]), vec![0..6]);
    }
}
