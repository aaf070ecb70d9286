//! Terminal styles used by the highlighter and the renderers.

/// Immutable set of escape sequences, one per style role.
///
/// [`Theme::plain`] maps every role to the empty string, which is how
/// no-color output is produced: the rendering code never branches on color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Deleted words inside a changed old line.
    pub deleted_word: &'static str,
    /// Inserted words inside a changed new line.
    pub inserted_word: &'static str,
    /// Whitespace-only deletions.
    pub deleted_space: &'static str,
    /// Whitespace-only insertions.
    pub inserted_space: &'static str,
    /// Background of a removed line.
    pub deleted_line: &'static str,
    /// Background of an added line.
    pub inserted_line: &'static str,
    /// Line number gutter.
    pub line_number: &'static str,
    /// File headers.
    pub header: &'static str,
    /// `@@` hunk headers.
    pub hunk_header: &'static str,
    /// Informational messages.
    pub notice: &'static str,
    /// Sequence that clears all styling.
    pub reset: &'static str,
}

impl Theme {
    /// The default 256-color palette.
    #[must_use]
    pub const fn ansi() -> Self {
        Self {
            deleted_word: "\x1b[48;5;74m\x1b[37m",
            inserted_word: "\x1b[48;5;36m\x1b[37m",
            deleted_space: "\x1b[41m",
            inserted_space: "\x1b[42m",
            deleted_line: "\x1b[48;5;67m\x1b[37m",
            inserted_line: "\x1b[48;5;65m\x1b[37m",
            line_number: "\x1b[90m",
            header: "\x1b[1m",
            hunk_header: "\x1b[36m",
            notice: "\x1b[34m",
            reset: "\x1b[0m",
        }
    }

    /// A theme that emits no escape sequences at all.
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            deleted_word: "",
            inserted_word: "",
            deleted_space: "",
            inserted_space: "",
            deleted_line: "",
            inserted_line: "",
            line_number: "",
            header: "",
            hunk_header: "",
            notice: "",
            reset: "",
        }
    }

    /// Picks [`Theme::ansi`] or [`Theme::plain`].
    #[must_use]
    pub const fn for_color(enabled: bool) -> Self {
        if enabled { Self::ansi() } else { Self::plain() }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::ansi()
    }
}
