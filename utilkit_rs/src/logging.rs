//! Tracing subscriber setup for the binary.
//!
//! Logs always go to stderr so that stdout carries nothing but prompts and
//! dispatch results.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Environment variable consulted when `--log-level` is not given.
pub const LOG_ENV: &str = "UTILKIT_LOG";

pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Pick the filter directive: CLI flag, then environment, then config file.
pub fn pick_directive(
    cli: Option<&str>,
    env: Option<&str>,
    config: Option<&str>,
) -> String {
    cli.or(env)
        .or(config)
        .filter(|d| !d.trim().is_empty())
        .unwrap_or(DEFAULT_LOG_LEVEL)
        .to_string()
}

pub fn init(cli: Option<&str>, config: Option<&str>) -> Result<()> {
    let env = std::env::var(LOG_ENV).ok();
    let directive = pick_directive(cli, env.as_deref(), config);
    let filter = EnvFilter::try_new(&directive)
        .map_err(|e| anyhow!("invalid log level '{}': {}", directive, e))?;

    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();

    Ok(())
}
