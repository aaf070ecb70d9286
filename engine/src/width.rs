//! Display width of text that may carry terminal escape sequences.
//!
//! Widths follow the `unicode-width` tables, with two terminal adjustments:
//! a tab counts as [`TAB_WIDTH`] columns and control characters count as zero.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use unicode_width::UnicodeWidthChar;

/// Columns occupied by a tab.
pub const TAB_WIDTH: usize = 4;

/// Marker appended to clipped text.
pub const ELLIPSIS: char = '…';

const SGR_RESET: &str = "\x1b[0m";

/// CSI sequences, OSC strings (BEL or ST terminated), and two-byte escapes.
static ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)|\x1b\[[0-?]*[ -/]*[@-~]|\x1b[0-Z\\-~]") {
        Ok(pattern) => pattern,
        Err(e) => panic!("escape pattern should be valid at compile time: {e}"),
    }
});

enum Segment<'a> {
    Escape(&'a str),
    Text(&'a str),
}

fn segments(text: &str) -> impl Iterator<Item = Segment<'_>> {
    let mut pos = 0;
    let mut matches = ESCAPE.find_iter(text).peekable();
    std::iter::from_fn(move || {
        if pos >= text.len() {
            return None;
        }
        match matches.peek() {
            Some(m) if m.start() == pos => {
                let escape = &text[m.start()..m.end()];
                pos = m.end();
                matches.next();
                Some(Segment::Escape(escape))
            }
            Some(m) => {
                let plain = &text[pos..m.start()];
                pos = m.start();
                Some(Segment::Text(plain))
            }
            None => {
                let plain = &text[pos..];
                pos = text.len();
                Some(Segment::Text(plain))
            }
        }
    })
}

/// Width of a single character in terminal columns.
#[must_use]
pub fn char_width(c: char) -> usize {
    match c {
        '\t' => TAB_WIDTH,
        c if c.is_control() => 0,
        c => c.width().unwrap_or(0),
    }
}

/// Removes every escape sequence, leaving only visible text.
#[must_use]
pub fn strip_escapes(text: &str) -> Cow<'_, str> {
    ESCAPE.replace_all(text, "")
}

/// Number of terminal columns `text` occupies once escapes are ignored.
#[must_use]
pub fn visible_width(text: &str) -> usize {
    strip_escapes(text).chars().map(char_width).sum()
}

/// True for an SGR sequence that leaves some styling active.
fn opens_style(escape: &str) -> Option<bool> {
    let params = escape.strip_prefix("\x1b[")?.strip_suffix('m')?;
    Some(!params.split(';').all(|p| p.is_empty() || p == "0"))
}

/// Clips `text` to at most `width` visible columns.
///
/// Text that already fits is returned unchanged. Otherwise visible characters
/// are kept while they fit in `width - 1` columns and [`ELLIPSIS`] fills the
/// last one. Escape sequences are copied verbatim and an open SGR style is
/// reset before the ellipsis. A zero width yields no visible characters.
#[must_use]
pub fn clip_to_width(text: &str, width: usize) -> Cow<'_, str> {
    if visible_width(text) <= width {
        return Cow::Borrowed(text);
    }
    let with_ellipsis = width >= 1;
    let budget = width.saturating_sub(1);

    let mut out = String::with_capacity(text.len());
    let mut used = 0;
    let mut style_open = false;
    'outer: for segment in segments(text) {
        match segment {
            Segment::Escape(escape) => {
                if let Some(open) = opens_style(escape) {
                    style_open = open;
                }
                out.push_str(escape);
            }
            Segment::Text(plain) => {
                for c in plain.chars() {
                    let w = char_width(c);
                    if used + w > budget {
                        break 'outer;
                    }
                    used += w;
                    out.push(c);
                }
            }
        }
    }
    if style_open {
        out.push_str(SGR_RESET);
    }
    if with_ellipsis {
        out.push(ELLIPSIS);
    }
    Cow::Owned(out)
}

/// Pads `text` with trailing spaces up to `width` visible columns.
///
/// Never truncates.
#[must_use]
pub fn pad_to_width(text: &str, width: usize) -> Cow<'_, str> {
    let current = visible_width(text);
    if current >= width {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + width - current);
    out.push_str(text);
    out.extend(std::iter::repeat_n(' ', width - current));
    Cow::Owned(out)
}
