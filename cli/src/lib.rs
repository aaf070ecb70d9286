//! zdiff - command-line front end of the zdiff engine.
//!
//! Parses arguments, loads layered configuration, reads both documents and
//! writes the rendered comparison. The binary in `main.rs` only wires these
//! pieces to the process (terminal detection, telemetry, exit status).

#![warn(clippy::pedantic)]

/// Command-line arguments.
pub mod args;
/// Input errors.
pub mod error;
/// Infrastructure components (config, telemetry).
pub mod infrastructure;
/// Document reading.
pub mod input;

use std::borrow::Cow;
use std::io::Write;

use anyhow::{Context, Result};
use tracing::info;
use zdiff_engine::{DiffRenderer, Theme};

pub use args::Args;
pub use error::InputError;
pub use infrastructure::config::{ColorChoice, Settings};

/// Result of a comparison, mapped onto the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Both documents hold the same text once line terminators are unified.
    Identical,
    /// The documents differ.
    Different,
}

impl Outcome {
    /// Exit status: 0 for identical inputs, 1 for differing inputs.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::Identical => 0,
            Self::Different => 1,
        }
    }
}

/// Exit status used for any error.
pub const ERROR_EXIT_CODE: u8 = 2;

/// Compares the two files named in `args` and writes the result to `out`.
///
/// # Errors
///
/// Returns an [`InputError`] if a file cannot be read, or an I/O error if
/// writing to `out` fails.
pub fn run<W: Write>(args: &Args, settings: &Settings, color: bool, out: &mut W) -> Result<Outcome> {
    let old = input::read_document(&args.file1)?;
    let new = input::read_document(&args.file2)?;

    let options = args.render_options(settings);
    info!(
        old = %args.file1.display(),
        new = %args.file2.display(),
        ?options,
        color,
        "comparing documents"
    );

    let renderer = DiffRenderer::new(Theme::for_color(color), options);
    let rendered = renderer.render(
        &old,
        &new,
        &args.file1.display().to_string(),
        &args.file2.display().to_string(),
    );
    out.write_all(rendered.as_bytes())
        .and_then(|()| out.flush())
        .context("Failed to write diff output")?;

    Ok(if normalize_newlines(&old) == normalize_newlines(&new) {
        Outcome::Identical
    } else {
        Outcome::Different
    })
}

/// Rewrites `\r\n` and lone `\r` terminators as `\n`.
fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Outcome::Identical.exit_code(), 0);
        assert_eq!(Outcome::Different.exit_code(), 1);
        assert_eq!(ERROR_EXIT_CODE, 2);
    }

    #[test]
    fn test_normalize_newlines() {
        assert_eq!(normalize_newlines("a\r\nb\rc\n"), "a\nb\nc\n");
        assert!(matches!(normalize_newlines("a\n"), Cow::Borrowed(_)));
    }
}
