//! Intra-line highlighting of a changed line pair.
//!
//! Regions are computed in four passes:
//!
//! 1. raw regions from a character-level comparison, with zero-length anchors
//!    on the old side for insertions that do not touch a word;
//! 2. trimming of fragments borrowed from the surrounding unchanged text;
//! 3. expansion to word boundaries;
//! 4. merging across small connective gaps (spaces, commas, short operators).
//!
//! The surviving regions are then wrapped in the theme's word or space style.
//! Every region is closed with a reset followed by the line style, so a
//! highlighted span never clears the line's own background.
//!
//! # Example
//!
//! ```
//! use zdiff_engine::highlight::line_pair_regions;
//!
//! let regions = line_pair_regions("let total = 0;", "let sum = 0;");
//! assert_eq!(regions.old[0].text("let total = 0;"), "total");
//! assert_eq!(regions.new[0].text("let sum = 0;"), "sum");
//! ```

mod refine;
mod regions;

use crate::theme::Theme;

/// Which line of a pair a region belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The old (removed) line.
    Old,
    /// The new (added) line.
    New,
}

/// Whether a region changes content or only whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    /// The region holds at least one non-whitespace character.
    Content,
    /// The region holds only whitespace.
    Space,
}

/// A changed span of one line, as a half-open range of character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeRegion {
    /// Side the region belongs to.
    pub side: Side,
    /// First changed character.
    pub start: usize,
    /// One past the last changed character.
    pub end: usize,
}

impl ChangeRegion {
    /// Number of characters covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// True for a zero-length anchor.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The covered slice of `line`.
    #[must_use]
    pub fn text<'a>(&self, line: &'a str) -> &'a str {
        let mut offsets = line
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(line.len()));
        let start = offsets.nth(self.start).unwrap_or(line.len());
        let end = offsets
            .nth(self.len().saturating_sub(1))
            .filter(|_| !self.is_empty())
            .unwrap_or(start);
        &line[start..end]
    }

    /// Classifies the region against the line it came from.
    #[must_use]
    pub fn kind(&self, line: &str) -> RegionKind {
        if self.text(line).trim().is_empty() {
            RegionKind::Space
        } else {
            RegionKind::Content
        }
    }
}

/// Final change regions of both lines of a pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinePairRegions {
    /// Regions of the old line, sorted and non-overlapping.
    pub old: Vec<ChangeRegion>,
    /// Regions of the new line, sorted and non-overlapping.
    pub new: Vec<ChangeRegion>,
}

impl LinePairRegions {
    /// True when neither side has a region.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.old.is_empty() && self.new.is_empty()
    }
}

/// Computes the change regions of an old/new line pair.
#[must_use]
pub fn line_pair_regions(old: &str, new: &str) -> LinePairRegions {
    if old == new {
        return LinePairRegions::default();
    }
    let old_chars: Vec<char> = old.chars().collect();
    let new_chars: Vec<char> = new.chars().collect();
    let (raw_old, raw_new) = regions::raw_regions(&old_chars, &new_chars);
    LinePairRegions {
        old: finish(&old_chars, raw_old, Side::Old),
        new: finish(&new_chars, raw_new, Side::New),
    }
}

fn finish(text: &[char], raw: Vec<std::ops::Range<usize>>, side: Side) -> Vec<ChangeRegion> {
    let expanded = raw
        .into_iter()
        .filter_map(|region| refine::expand(text, region))
        .collect();
    refine::merge(text, expanded)
        .into_iter()
        .map(|r| ChangeRegion {
            side,
            start: r.start,
            end: r.end,
        })
        .collect()
}

/// Highlights an old/new line pair with the theme's intra-line styles.
///
/// Returns the old and new line with every change region wrapped in the
/// deleted or inserted word style (space style for whitespace-only regions).
#[must_use]
pub fn highlight_line_pair(old: &str, new: &str, theme: &Theme) -> (String, String) {
    let regions = line_pair_regions(old, new);
    (
        mark(
            old,
            &regions.old,
            &Marker {
                word: theme.deleted_word,
                space: theme.deleted_space,
                line: theme.deleted_line,
                reset: theme.reset,
            },
        ),
        mark(
            new,
            &regions.new,
            &Marker {
                word: theme.inserted_word,
                space: theme.inserted_space,
                line: theme.inserted_line,
                reset: theme.reset,
            },
        ),
    )
}

struct Marker<'t> {
    word: &'t str,
    space: &'t str,
    line: &'t str,
    reset: &'t str,
}

fn mark(line: &str, regions: &[ChangeRegion], marker: &Marker<'_>) -> String {
    if regions.is_empty() {
        return line.to_string();
    }
    let chars: Vec<char> = line.chars().collect();
    let mut out = String::with_capacity(line.len() + regions.len() * 32);
    let mut pos = 0;
    for region in regions {
        out.extend(&chars[pos..region.start]);
        let block: String = chars[region.start..region.end].iter().collect();
        let style = if block.trim().is_empty() {
            marker.space
        } else {
            marker.word
        };
        out.push_str(style);
        out.push_str(&block);
        out.push_str(marker.reset);
        out.push_str(marker.line);
        pos = region.end;
    }
    out.extend(&chars[pos..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::is_word_char;
    use proptest::prelude::*;

    fn texts<'a>(line: &'a str, regions: &[ChangeRegion]) -> Vec<&'a str> {
        regions.iter().map(|r| r.text(line)).collect()
    }

    #[test]
    fn test_identical_lines_have_no_regions() {
        assert!(line_pair_regions("same", "same").is_empty());
        assert!(line_pair_regions("", "").is_empty());
    }

    #[test]
    fn test_spaces_around_operator_are_space_only() {
        let (old, new) = ("    return a+b", "    return a + b");
        let regions = line_pair_regions(old, new);
        assert!(regions.old.is_empty());
        assert_eq!(texts(new, &regions.new), vec![" ", " "]);
        assert!(regions.new.iter().all(|r| r.kind(new) == RegionKind::Space));
    }

    #[test]
    fn test_shared_fragment_is_not_marked() {
        let (old, new) = ("extra something", "extra thing");
        let regions = line_pair_regions(old, new);
        assert_eq!(texts(old, &regions.old), vec!["something"]);
        assert!(regions.new.is_empty());
    }

    #[test]
    fn test_rename_marks_whole_identifiers() {
        let (old, new) = ("let total = count + 1;", "let sum = count + 2;");
        let regions = line_pair_regions(old, new);
        assert_eq!(texts(old, &regions.old), vec!["total", "1"]);
        assert_eq!(texts(new, &regions.new), vec!["sum", "2"]);
    }

    #[test]
    fn test_plural_suffix_marks_word_on_new_side() {
        let (old, new) = ("the cat sat", "the cats sat");
        let regions = line_pair_regions(old, new);
        assert!(regions.old.is_empty());
        assert_eq!(texts(new, &regions.new), vec!["cats"]);
    }

    #[test]
    fn test_region_text_handles_multibyte() {
        let region = ChangeRegion {
            side: Side::New,
            start: 1,
            end: 3,
        };
        assert_eq!(region.text("añbç"), "ñb");
        let anchor = ChangeRegion {
            side: Side::Old,
            start: 4,
            end: 4,
        };
        assert_eq!(anchor.text("añbç"), "");
    }

    #[test]
    fn test_highlight_restores_line_background() {
        let theme = Theme::ansi();
        let (old, new) = highlight_line_pair("x = 1", "x = 2", &theme);
        assert_eq!(
            old,
            format!(
                "x = {}1{}{}",
                theme.deleted_word, theme.reset, theme.deleted_line
            )
        );
        assert_eq!(
            new,
            format!(
                "x = {}2{}{}",
                theme.inserted_word, theme.reset, theme.inserted_line
            )
        );
    }

    #[test]
    fn test_space_only_change_uses_space_style() {
        let theme = Theme::ansi();
        let (_, new) = highlight_line_pair("a+b", "a +b", &theme);
        assert_eq!(
            new,
            format!(
                "a{} {}{}+b",
                theme.inserted_space, theme.reset, theme.inserted_line
            )
        );
    }

    #[test]
    fn test_plain_theme_returns_text_unchanged() {
        let (old, new) = highlight_line_pair("foo(a)", "foo(a, b)", &Theme::plain());
        assert_eq!((old.as_str(), new.as_str()), ("foo(a)", "foo(a, b)"));
    }

    fn splits_word(line: &str, at: usize) -> bool {
        let chars: Vec<char> = line.chars().collect();
        at > 0 && at < chars.len() && is_word_char(chars[at - 1]) && is_word_char(chars[at])
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Property: a line compared with itself has no change regions.
        #[test]
        fn identical_lines_are_unmarked(a in "[a-z_ ,.+()]{0,24}") {
            prop_assert!(line_pair_regions(&a, &a).is_empty());
        }

        /// Property: no region boundary falls strictly inside a word.
        #[test]
        fn regions_respect_word_boundaries(
            a in "[ab_ ,+]{0,16}",
            b in "[ab_ ,+]{0,16}",
        ) {
            let regions = line_pair_regions(&a, &b);
            for r in &regions.old {
                prop_assert!(!splits_word(&a, r.start) && !splits_word(&a, r.end));
            }
            for r in &regions.new {
                prop_assert!(!splits_word(&b, r.start) && !splits_word(&b, r.end));
            }
        }

        /// Property: regions are sorted, disjoint and within the line.
        #[test]
        fn regions_are_sorted_and_in_bounds(
            a in "[a-c ;]{0,16}",
            b in "[a-c ;]{0,16}",
        ) {
            let regions = line_pair_regions(&a, &b);
            for (line, side) in [(&a, &regions.old), (&b, &regions.new)] {
                let len = line.chars().count();
                let mut last_end = 0;
                for r in side.iter() {
                    prop_assert!(r.start >= last_end && r.start < r.end && r.end <= len);
                    last_end = r.end;
                }
            }
        }
    }
}
