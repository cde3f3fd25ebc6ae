use std::io::IsTerminal as _;

use anyhow::Context as _;
use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset. HTTP client chatter stays quiet so the
/// per-lesson `renamed` lines are readable during a REST batch.
const DEFAULT_FILTER: &str = "info,reqwest=warn";

/// Logs go to stderr; stdout carries the change report. Colour only when
/// stderr is a terminal, so redirected logs stay plain text.
pub fn init() -> anyhow::Result<()> {
    let filter = build_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("initialize tracing subscriber: {err}"))?;

    Ok(())
}

fn build_filter(directives: Option<&str>) -> anyhow::Result<EnvFilter> {
    match directives.map(str::trim).filter(|d| !d.is_empty()) {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid {}: {directives}", EnvFilter::DEFAULT_ENV)),
        None => EnvFilter::try_new(DEFAULT_FILTER).context("build default log filter"),
    }
}
