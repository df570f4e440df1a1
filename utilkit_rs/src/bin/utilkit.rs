//! utilkit CLI binary.
//!
//! With no positional arguments it starts the interactive loop; otherwise the
//! arguments are dispatched once as `package:function [args...]`.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use utilkit::cli::entrypoint::{self, EntryOptions};
use utilkit::logging;
use utilkit::types::ColorMode;

#[derive(Parser, Debug)]
#[command(name = "utilkit", author, version, about)]
struct Cli {
    /// Config file (default: .utilkit/config.toml in the working directory).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Color for status lines (auto|always|never).
    #[arg(long, value_parser = ColorMode::parse)]
    color: Option<ColorMode>,
    /// Log filter (trace|debug|info|warn|error or a tracing directive).
    #[arg(long)]
    log_level: Option<String>,
    /// Skip the welcome banner.
    #[arg(long)]
    no_banner: bool,
    /// One-shot command: package:function [args...]
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = entrypoint::load_config(cli.config);
    logging::init(cli.log_level.as_deref(), config.log_level.as_deref())?;

    let mut opts = EntryOptions::new(config);
    opts.color = cli.color;
    opts.banner = opts.banner && !cli.no_banner;
    opts.command = cli.command;

    Ok(entrypoint::run(opts)?)
}
