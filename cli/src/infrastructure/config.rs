//! Layered configuration: built-in defaults, an optional TOML file, then
//! `ZDIFF__`-prefixed environment variables.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use zdiff_engine::{Layout, LineAlgorithm};

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "ZDIFF";

/// When to emit color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Color when stdout is a terminal.
    #[default]
    Auto,
    /// Always color.
    Always,
    /// Never color.
    Never,
}

impl ColorChoice {
    /// Resolves the choice against whether stdout is a terminal.
    #[must_use]
    pub const fn enabled(self, is_terminal: bool) -> bool {
        match self {
            Self::Auto => is_terminal,
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// All configuration sections.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Comparison settings.
    pub diff: DiffSettings,
    /// Output settings.
    pub display: DisplaySettings,
    /// Log output settings.
    pub logging: LoggingSettings,
}

/// Comparison settings.
#[derive(Debug, Deserialize, Clone)]
pub struct DiffSettings {
    /// Context lines around each change.
    pub context: usize,
    /// Line matcher.
    pub algorithm: LineAlgorithm,
}

/// Output settings.
#[derive(Debug, Deserialize, Clone)]
pub struct DisplaySettings {
    /// Color mode.
    pub color: ColorChoice,
    /// Output layout.
    pub layout: Layout,
    /// Terminal width used by the side-by-side layout.
    pub width: usize,
}

/// Log output settings.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON log lines instead of text.
    pub json: bool,
}

/// Location of the user configuration file, if the platform has one.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("zdiff").join("config.toml"))
}

impl Settings {
    /// Loads settings from the default file location and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a source is malformed or a value has the wrong type.
    pub fn new() -> Result<Self, ConfigError> {
        let env = Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true);
        Self::load(default_config_path().as_deref(), env)
    }

    /// Loads settings from an explicit file and environment source.
    ///
    /// A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if a source is malformed or a value has the wrong type.
    pub fn load(file: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("diff.context", 3)?
            .set_default("diff.algorithm", "matching-blocks")?
            .set_default("display.color", "auto")?
            .set_default("display.layout", "unified")?
            .set_default("display.width", 120)?
            .set_default("logging.level", "warn")?
            .set_default("logging.json", false)?;
        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(false));
        }
        builder.add_source(env).build()?.try_deserialize()
    }
}
