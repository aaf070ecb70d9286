//! `zdiff` binary entry point.

use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::error;
use zdiff::infrastructure::telemetry::{TelemetryBuilder, verbosity_level};
use zdiff::{Args, ERROR_EXIT_CODE, Settings};

fn main() -> ExitCode {
    let args = Args::parse();
    match try_main(&args) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            error!(error = %format!("{err:#}"), "zdiff failed");
            eprintln!("Error: {err:#}");
            ExitCode::from(ERROR_EXIT_CODE)
        }
    }
}

fn try_main(args: &Args) -> anyhow::Result<u8> {
    let settings = Settings::new().context("Failed to load configuration")?;

    TelemetryBuilder::new("zdiff")
        .with_log_level(verbosity_level(args.verbose, &settings.logging.level))
        .with_json(settings.logging.json)
        .init()
        .context("Failed to initialize telemetry")?;

    let stdout = std::io::stdout();
    let color = args.color_enabled(&settings, stdout.is_terminal());
    let outcome = zdiff::run(args, &settings, color, &mut stdout.lock())?;
    Ok(outcome.exit_code())
}
