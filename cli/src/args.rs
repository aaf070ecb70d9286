use std::path::PathBuf;

use clap::{ArgAction, Parser};
use zdiff_engine::{Layout, LineAlgorithm, RenderOptions};

use crate::infrastructure::config::{ColorChoice, Settings};

/// Command-line interface of `zdiff`.
///
/// Every option overrides the matching configuration value.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "zdiff",
    version,
    about = "Text diff with git-style output and word-level highlighting",
    long_about = "zdiff - text diff with git-style output\n\n\
                  Pairs changed lines by similarity, highlights the changed words inside \
                  each pair and merges neighbouring changes into readable blocks."
)]
pub struct Args {
    /// First file to compare.
    pub file1: PathBuf,

    /// Second file to compare.
    pub file2: PathBuf,

    /// Disable colored output.
    #[arg(long, conflicts_with = "color")]
    pub no_color: bool,

    /// When to use color.
    #[arg(long, value_name = "WHEN")]
    pub color: Option<ColorChoice>,

    /// Number of context lines to show.
    #[arg(short = 'c', long, value_name = "N")]
    pub context: Option<usize>,

    /// Show old and new lines in two columns.
    #[arg(long)]
    pub side_by_side: bool,

    /// Terminal width for the side-by-side layout.
    #[arg(short = 'w', long, env = "COLUMNS", value_name = "N")]
    pub width: Option<usize>,

    /// Line matcher used to find changed lines.
    #[arg(long, value_name = "ALG", value_parser = parse_algorithm)]
    pub algorithm: Option<LineAlgorithm>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,
}

fn parse_algorithm(value: &str) -> Result<LineAlgorithm, String> {
    value.parse()
}

impl Args {
    /// Resolves whether to emit color.
    #[must_use]
    pub fn color_enabled(&self, settings: &Settings, is_terminal: bool) -> bool {
        if self.no_color {
            return false;
        }
        self.color
            .unwrap_or(settings.display.color)
            .enabled(is_terminal)
    }

    /// Merges the options with the loaded settings.
    #[must_use]
    pub fn render_options(&self, settings: &Settings) -> RenderOptions {
        RenderOptions {
            context: self.context.unwrap_or(settings.diff.context),
            algorithm: self.algorithm.unwrap_or(settings.diff.algorithm),
            layout: if self.side_by_side {
                Layout::SideBySide
            } else {
                settings.display.layout
            },
            width: self.width.unwrap_or(settings.display.width),
        }
    }
}
