//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use config::Environment;
use tempfile::TempDir;
use zdiff::{Args, Outcome, Settings};

/// Two documents written to a temporary directory.
pub struct Fixture {
    dir: TempDir,
    pub old: PathBuf,
    pub new: PathBuf,
}

impl Fixture {
    pub fn new(old: &str, new: &str) -> Result<Self> {
        Self::from_bytes(old.as_bytes(), new.as_bytes())
    }

    pub fn from_bytes(old: &[u8], new: &[u8]) -> Result<Self> {
        let dir = tempfile::tempdir()?;
        let old_path = dir.path().join("old.txt");
        let new_path = dir.path().join("new.txt");
        std::fs::write(&old_path, old)?;
        std::fs::write(&new_path, new)?;
        Ok(Self {
            dir,
            old: old_path,
            new: new_path,
        })
    }

    pub fn missing(&self) -> PathBuf {
        self.dir.path().join("missing.txt")
    }

    /// Argument vector naming both documents followed by `extra`.
    pub fn args(&self, extra: &[&str]) -> Args {
        let mut argv = vec![
            "zdiff".to_string(),
            self.old.display().to_string(),
            self.new.display().to_string(),
        ];
        argv.extend(extra.iter().map(|s| (*s).to_string()));
        Args::parse_from(argv)
    }
}

/// Settings with built-in defaults only.
pub fn default_settings() -> Settings {
    Settings::load(
        None,
        Environment::with_prefix("ZDIFF").source(Some(Default::default())),
    )
    .expect("defaults are valid")
}

/// Runs the CLI pipeline and returns the outcome and captured stdout.
pub fn run(args: &Args, color: bool) -> Result<(Outcome, String)> {
    let mut out = Vec::new();
    let outcome = zdiff::run(args, &default_settings(), color, &mut out)?;
    Ok((outcome, String::from_utf8(out)?))
}
