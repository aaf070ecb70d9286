//! Line similarity scoring.
//!
//! The score is the larger of a character ratio and a token ratio. The token
//! ratio keeps lines whose shape survived a rename (same number and order of
//! identifiers) from looking unrelated just because the renamed identifiers
//! share few characters.

use crate::matcher::SequenceMatcher;

/// Returns true for characters that belong to an identifier.
#[must_use]
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Splits a line into maximal runs of word characters.
#[must_use]
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split(|c: char| !is_word_char(c))
        .filter(|token| !token.is_empty())
        .collect()
}

/// Character-level ratio between two lines.
#[must_use]
pub fn char_ratio(old: &str, new: &str) -> f64 {
    let (a, b): (Vec<char>, Vec<char>) = (old.chars().collect(), new.chars().collect());
    SequenceMatcher::new(&a, &b).ratio()
}

/// Token-level ratio between two lines; 0.0 when either side has no tokens.
#[must_use]
pub fn token_ratio(old: &str, new: &str) -> f64 {
    let (a, b) = (tokenize(old), tokenize(new));
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    SequenceMatcher::new(&a, &b).ratio()
}

/// Similarity of two lines in `[0, 1]`.
///
/// The arguments are put into a canonical order before matching, so the score
/// does not depend on which line is called old and which new.
#[must_use]
pub fn score(old: &str, new: &str) -> f64 {
    ScoredLine::new(old).score(&ScoredLine::new(new))
}

/// A line split into characters and tokens once, for scoring against many
/// other lines.
#[derive(Debug, Clone)]
pub struct ScoredLine<'a> {
    text: &'a str,
    chars: Vec<char>,
    tokens: Vec<&'a str>,
}

impl<'a> ScoredLine<'a> {
    /// Prepares `text` for scoring.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            chars: text.chars().collect(),
            tokens: tokenize(text),
        }
    }

    /// Same value as [`score`] on the two underlying lines.
    #[must_use]
    pub fn score(&self, other: &Self) -> f64 {
        let (a, b) = if self.text <= other.text { (self, other) } else { (other, self) };
        let chars = SequenceMatcher::new(&a.chars, &b.chars).ratio();
        if a.tokens.is_empty() || b.tokens.is_empty() {
            return chars;
        }
        chars.max(SequenceMatcher::new(&a.tokens, &b.tokens).ratio())
    }

    /// Upper bound on [`ScoredLine::score`] from lengths alone.
    ///
    /// A ratio can never exceed `2 * min(la, lb) / (la + lb)`; the bound is
    /// the larger of that limit over characters and over tokens.
    #[must_use]
    pub fn score_bound(&self, other: &Self) -> f64 {
        let chars = length_bound(self.chars.len(), other.chars.len());
        if self.tokens.is_empty() || other.tokens.is_empty() {
            return chars;
        }
        chars.max(length_bound(self.tokens.len(), other.tokens.len()))
    }
}

fn length_bound(a: usize, b: usize) -> f64 {
    if a + b == 0 {
        return 1.0;
    }
    2.0 * a.min(b) as f64 / (a + b) as f64
}
