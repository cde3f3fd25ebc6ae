use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

fn main() -> ExitCode {
    match try_main() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> anyhow::Result<ExitCode> {
    lessontitle::logging::init().context("init logging")?;

    let cli = lessontitle::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    let summary = match cli.command {
        lessontitle::cli::Command::Improve(args) => {
            lessontitle::commands::improve(args).context("improve")?
        }
        lessontitle::cli::Command::Prefix(args) => {
            lessontitle::commands::prefix(args).context("prefix")?
        }
        lessontitle::cli::Command::Normalize(args) => {
            lessontitle::commands::normalize(args).context("normalize")?;
            return Ok(ExitCode::SUCCESS);
        }
    };

    if summary.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
