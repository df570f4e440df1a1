//! Shared start-up path for the `utilkit` binary.
//!
//! Builds the registry, registers every package, reports the registration
//! status, then either runs one command or enters the interactive loop.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use tracing::info;

use super::command::parse_tokens;
use super::repl::{Repl, dispatch, render_error};
use crate::colors::Painter;
use crate::config::UtilkitConfig;
use crate::error::DispatchError;
use crate::packages;
use crate::registry::{BatchReport, Registry};
use crate::types::ColorMode;

/// Options resolved by the binary from flags and config.
#[derive(Debug, Clone)]
pub struct EntryOptions {
    pub config: UtilkitConfig,
    /// `--color` overrides `config.color`.
    pub color: Option<ColorMode>,
    pub banner: bool,
    /// Tokens for one-shot mode; empty starts the interactive loop.
    pub command: Vec<String>,
}

impl EntryOptions {
    pub fn new(config: UtilkitConfig) -> Self {
        let banner = config.banner;
        Self {
            config,
            color: None,
            banner,
            command: Vec::new(),
        }
    }
}

/// Load config from `--config` or the working directory.
pub fn load_config(explicit: Option<PathBuf>) -> UtilkitConfig {
    match explicit {
        Some(path) => UtilkitConfig::load_from_path(&path),
        None => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            UtilkitConfig::load(&cwd)
        }
    }
}

/// `<package> register success|failed`
pub fn registration_status(report: &BatchReport, painter: &Painter) -> String {
    if report.all_registered() {
        painter.ok(&format!("{} register success", report.package))
    } else {
        painter.error(&format!(
            "{} register failed ({}/{} registered)",
            report.package, report.registered, report.total
        ))
    }
}

/// Build and populate the registry, printing one status line per package to stderr.
pub fn bootstrap(config: &UtilkitConfig, painter: &Painter) -> Registry {
    let registry = Registry::new();
    for report in packages::register_all(&registry, config) {
        eprintln!("{}", registration_status(&report, painter));
    }
    info!(functions = registry.len(), "registry ready");
    registry
}

/// Dispatch already split tokens once. Returns whether the dispatch succeeded.
pub fn run_once<W: Write>(registry: &Registry, tokens: Vec<String>, out: &mut W) -> io::Result<bool> {
    let result = parse_tokens(tokens).and_then(|parsed| match parsed {
        Some(cmd) => dispatch(registry, &cmd),
        None => Err(DispatchError::MalformedCommand(String::new())),
    });

    match result {
        Ok(values) => {
            for value in values {
                writeln!(out, "{value}")?;
            }
            Ok(true)
        }
        Err(err) => {
            writeln!(out, "{}", render_error(&err))?;
            Ok(false)
        }
    }
}

/// Run the CLI with the given options. This is the shared main() body.
pub fn run(opts: EntryOptions) -> io::Result<ExitCode> {
    let painter = Painter::new(opts.color.unwrap_or(opts.config.color));
    let registry = bootstrap(&opts.config, &painter);

    let stdout = io::stdout();
    if !opts.command.is_empty() {
        let ok = run_once(&registry, opts.command, &mut stdout.lock())?;
        return Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE });
    }

    let stdin = io::stdin();
    let exit = Repl::new(&registry, stdin.lock(), stdout.lock())
        .with_banner(opts.banner)
        .run()?;
    info!(?exit, "interactive loop finished");
    Ok(ExitCode::SUCCESS)
}
