//! Git-style unified and side-by-side rendering of a comparison.

use std::fmt::Write as _;

use serde::Deserialize;
use tracing::debug;

use crate::align::{AlignedLine, AlignmentRow, align_replace_block};
use crate::highlight::highlight_line_pair;
use crate::matcher::{DiffOp, Hunk, LineAlgorithm, group_opcodes};
use crate::theme::Theme;
use crate::width::{clip_to_width, pad_to_width};

/// Message printed when the inputs have no differing lines.
pub const NO_CHANGES: &str = "No changes detected";

const GUTTER_WIDTH: usize = 4;
const COLUMN_SEPARATOR: &str = " │ ";

/// How changed lines are laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    /// Removed and added lines interleaved in one column.
    #[default]
    Unified,
    /// Old and new lines in two fixed-width panels.
    SideBySide,
}

impl std::str::FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unified" => Ok(Self::Unified),
            "side-by-side" => Ok(Self::SideBySide),
            other => Err(format!("unknown layout: {other}")),
        }
    }
}

/// Rendering parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Unchanged lines shown around each change.
    pub context: usize,
    /// Line matcher used for hunk grouping.
    pub algorithm: LineAlgorithm,
    /// Output layout.
    pub layout: Layout,
    /// Total terminal width for [`Layout::SideBySide`].
    pub width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            context: 3,
            algorithm: LineAlgorithm::default(),
            layout: Layout::default(),
            width: 120,
        }
    }
}

/// Splits text into lines without terminators.
///
/// Recognises `\n`, `\r\n` and a lone `\r`. A trailing terminator does not
/// start an extra empty line.
#[must_use]
pub fn split_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&text[start..i]);
                start = i + 1;
            }
            b'\r' => {
                lines.push(&text[start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// One rendered row, before layout.
enum Row<'a> {
    Context {
        old: AlignedLine<'a>,
        new: AlignedLine<'a>,
    },
    Removed(AlignedLine<'a>, String),
    Added(AlignedLine<'a>, String),
    Changed {
        old: AlignedLine<'a>,
        new: AlignedLine<'a>,
        old_text: String,
        new_text: String,
    },
}

/// Renders comparisons with a fixed theme and options.
#[derive(Debug, Clone, Default)]
pub struct DiffRenderer {
    theme: Theme,
    options: RenderOptions,
}

impl DiffRenderer {
    /// Creates a renderer.
    #[must_use]
    pub const fn new(theme: Theme, options: RenderOptions) -> Self {
        Self { theme, options }
    }

    /// Returns the theme in use.
    #[must_use]
    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Returns the options in use.
    #[must_use]
    pub const fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Renders two documents with the configured layout.
    #[must_use]
    pub fn render(&self, old_text: &str, new_text: &str, old_name: &str, new_name: &str) -> String {
        let (old, new) = (split_lines(old_text), split_lines(new_text));
        match self.options.layout {
            Layout::Unified => self.render_unified(&old, &new, old_name, new_name),
            Layout::SideBySide => self.render_side_by_side(&old, &new, old_name, new_name),
        }
    }

    /// Renders git-style unified output.
    #[must_use]
    pub fn render_unified(&self, old: &[&str], new: &[&str], old_name: &str, new_name: &str) -> String {
        let Some(hunks) = self.hunks(old, new) else {
            return self.no_changes();
        };
        let t = &self.theme;
        let mut out = self.file_headers(old_name, new_name);
        for hunk in &hunks {
            let _ = writeln!(out, "{}{}{}", t.hunk_header, hunk.header(), t.reset);
            for row in self.rows(hunk, old, new) {
                match row {
                    Row::Context { old, .. } => {
                        let _ = writeln!(out, "{} {}", self.gutter(Some(old)), old.text);
                    }
                    Row::Removed(line, text) => self.unified_line(&mut out, line, '-', &text, t.deleted_line),
                    Row::Added(line, text) => self.unified_line(&mut out, line, '+', &text, t.inserted_line),
                    Row::Changed {
                        old,
                        new,
                        old_text,
                        new_text,
                    } => {
                        self.unified_line(&mut out, old, '-', &old_text, t.deleted_line);
                        self.unified_line(&mut out, new, '+', &new_text, t.inserted_line);
                    }
                }
            }
            out.push('\n');
        }
        out
    }

    /// Renders two fixed-width panels, old on the left and new on the right.
    ///
    /// Each panel gets half of the configured width after the gutters and the
    /// separator; longer lines are clipped with an ellipsis.
    #[must_use]
    pub fn render_side_by_side(
        &self,
        old: &[&str],
        new: &[&str],
        old_name: &str,
        new_name: &str,
    ) -> String {
        let Some(hunks) = self.hunks(old, new) else {
            return self.no_changes();
        };
        let t = &self.theme;
        let fixed = 2 * (GUTTER_WIDTH + 1) + COLUMN_SEPARATOR.chars().count();
        let panel = self.options.width.saturating_sub(fixed) / 2;
        debug!(width = self.options.width, panel, "side-by-side layout");

        let mut out = self.file_headers(old_name, new_name);
        for hunk in &hunks {
            let _ = writeln!(out, "{}{}{}", t.hunk_header, hunk.header(), t.reset);
            for row in self.rows(hunk, old, new) {
                let (left, right) = match row {
                    Row::Context { old, new } => (
                        self.cell(Some(old), ' ', old.text, "", panel),
                        self.cell(Some(new), ' ', new.text, "", panel),
                    ),
                    Row::Removed(line, text) => (
                        self.cell(Some(line), '-', &text, t.deleted_line, panel),
                        self.cell(None, ' ', "", "", panel),
                    ),
                    Row::Added(line, text) => (
                        self.cell(None, ' ', "", "", panel),
                        self.cell(Some(line), '+', &text, t.inserted_line, panel),
                    ),
                    Row::Changed {
                        old,
                        new,
                        old_text,
                        new_text,
                    } => (
                        self.cell(Some(old), '-', &old_text, t.deleted_line, panel),
                        self.cell(Some(new), '+', &new_text, t.inserted_line, panel),
                    ),
                };
                let line = format!("{left}{COLUMN_SEPARATOR}{right}");
                let _ = writeln!(out, "{}", line.trim_end());
            }
            out.push('\n');
        }
        out
    }

    fn hunks(&self, old: &[&str], new: &[&str]) -> Option<Vec<Hunk>> {
        let ops = self.options.algorithm.diff_lines(old, new);
        let hunks = group_opcodes(&ops, self.options.context);
        debug!(
            old_lines = old.len(),
            new_lines = new.len(),
            hunks = hunks.len(),
            "grouped line changes"
        );
        (!hunks.is_empty()).then_some(hunks)
    }

    fn no_changes(&self) -> String {
        format!("    {}{NO_CHANGES}{}\n", self.theme.notice, self.theme.reset)
    }

    fn file_headers(&self, old_name: &str, new_name: &str) -> String {
        let t = &self.theme;
        format!(
            "{h}--- {old_name}{r}\n{h}+++ {new_name}{r}\n",
            h = t.header,
            r = t.reset
        )
    }

    fn gutter(&self, line: Option<AlignedLine<'_>>) -> String {
        match line {
            Some(line) => format!(
                "{}{:>width$}{}",
                self.theme.line_number,
                line.line_no,
                self.theme.reset,
                width = GUTTER_WIDTH
            ),
            None => " ".repeat(GUTTER_WIDTH),
        }
    }

    fn unified_line(&self, out: &mut String, line: AlignedLine<'_>, marker: char, text: &str, style: &str) {
        let _ = writeln!(
            out,
            "{} {style}{marker}{text}{}",
            self.gutter(Some(line)),
            self.theme.reset
        );
    }

    fn cell(&self, line: Option<AlignedLine<'_>>, marker: char, text: &str, style: &str, panel: usize) -> String {
        let body = if line.is_some() {
            let styled = format!("{style}{marker}{text}{}", self.theme.reset);
            pad_to_width(&clip_to_width(&styled, panel), panel).into_owned()
        } else {
            " ".repeat(panel)
        };
        format!("{} {body}", self.gutter(line))
    }

    fn rows<'a>(&self, hunk: &Hunk, old: &[&'a str], new: &[&'a str]) -> Vec<Row<'a>> {
        let mut rows = Vec::new();
        for op in hunk.ops() {
            match op {
                DiffOp::Equal { old: o, new: n } => {
                    rows.extend(o.clone().zip(n.clone()).map(|(i, j)| Row::Context {
                        old: at(old, i),
                        new: at(new, j),
                    }));
                }
                DiffOp::Delete { old: range, .. } => {
                    rows.extend(range.clone().map(|i| Row::Removed(at(old, i), old[i].to_string())));
                }
                DiffOp::Insert { new: range, .. } => {
                    rows.extend(range.clone().map(|j| Row::Added(at(new, j), new[j].to_string())));
                }
                DiffOp::Replace { old: o, new: n } => {
                    let aligned = align_replace_block(&old[o.clone()], &new[n.clone()], o.start, n.start);
                    rows.extend(aligned.into_iter().map(|row| self.row(row)));
                }
            }
        }
        rows
    }

    fn row<'a>(&self, row: AlignmentRow<'a>) -> Row<'a> {
        match row {
            AlignmentRow::Equal { old, new } => Row::Context { old, new },
            AlignmentRow::Delete(line) => Row::Removed(line, line.text.to_string()),
            AlignmentRow::Insert(line) => Row::Added(line, line.text.to_string()),
            AlignmentRow::Replace { old, new } => {
                let (old_text, new_text) = highlight_line_pair(old.text, new.text, &self.theme);
                Row::Changed {
                    old,
                    new,
                    old_text,
                    new_text,
                }
            }
        }
    }
}

fn at<'a>(lines: &[&'a str], index: usize) -> AlignedLine<'a> {
    AlignedLine {
        line_no: index + 1,
        text: lines[index],
    }
}
