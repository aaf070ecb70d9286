//! zdiff engine - alignment and highlighting core of the zdiff tool.
//!
//! This crate turns two documents into a readable comparison: line opcodes and
//! hunks from a sequence matcher, pairing of old and new lines inside replace
//! blocks, word-aware intra-line change regions, and width-aware rendering.
//! It performs no I/O.
//!
//! # Example
//!
//! ```
//! use zdiff_engine::{DiffRenderer, RenderOptions, Theme};
//!
//! let renderer = DiffRenderer::new(Theme::plain(), RenderOptions::default());
//! let out = renderer.render("a\nb\n", "a\nc\n", "old", "new");
//! assert!(out.contains("@@ -1,2 +1,2 @@"));
//! ```

#![warn(clippy::pedantic)]

/// Pairing of old and new lines inside a replace block.
pub mod align;
/// Intra-line change regions and their rendering.
pub mod highlight;
/// Line and character matchers, opcodes and hunk grouping.
pub mod matcher;
/// Unified and side-by-side output.
pub mod render;
/// Line similarity scoring.
pub mod similarity;
/// Terminal styles.
pub mod theme;
/// Display width of escape-laden text.
pub mod width;

pub use align::{AlignStrategy, AlignedLine, AlignmentRow, align_replace_block};
pub use highlight::{ChangeRegion, LinePairRegions, RegionKind, Side, highlight_line_pair, line_pair_regions};
pub use matcher::{DiffAlgorithm, DiffOp, DiffTag, Hunk, LineAlgorithm, MyersDiff, SequenceMatcher, group_opcodes};
pub use render::{DiffRenderer, Layout, RenderOptions, split_lines};
pub use similarity::score;
pub use theme::Theme;
pub use width::{clip_to_width, pad_to_width, visible_width};
