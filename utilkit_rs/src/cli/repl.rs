//! The interactive read-dispatch-print loop.
//!
//! Strictly sequential: one line is read, classified, dispatched and its
//! results printed before the next prompt. Every dispatch error is printed as
//! one line and the loop continues; only an unreadable input stream ends it
//! early.

use std::io::{self, BufRead, Write};

use tracing::debug;

use super::command::{LineCommand, ParsedCommand, classify_line};
use super::help_texts::{BANNER, HELP, PROMPT};
use crate::error::{DispatchError, Result};
use crate::registry::Registry;

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// `exit` or `quit` was typed.
    Requested,
    EndOfInput,
    /// Reading stdin failed; a diagnostic has been printed.
    InputError,
}

/// Invoke a parsed command against the registry.
pub fn dispatch(registry: &Registry, cmd: &ParsedCommand) -> Result<Vec<String>> {
    debug!(package = %cmd.package, function = %cmd.function, "dispatch");
    registry
        .invoke(&cmd.package, &cmd.function, &cmd.args)
        .inspect_err(|err| debug!(code = err.code(), %err, "dispatch failed"))
}

/// Rendering of a dispatch error: one line, preceded by any output the
/// handler produced before failing.
pub fn render_error(err: &DispatchError) -> String {
    match err {
        DispatchError::AfterOutput { output, error } => {
            let mut lines = output.clone();
            lines.push(render_error(error));
            lines.join("\n")
        }
        DispatchError::MalformedCommand(_) => err.to_string(),
        DispatchError::UnterminatedQuote | DispatchError::InvalidArgument { .. } => {
            format!("parse error: {err}")
        }
        _ => format!("error: {err}"),
    }
}

/// Sorted `package:function  (signature)` lines for the `list` command.
pub fn function_listing(registry: &Registry) -> Vec<String> {
    let mut entries = registry.list_all();
    entries.sort_by(|a, b| (&a.package, &a.name).cmp(&(&b.package, &b.name)));
    entries
        .iter()
        .map(|entry| {
            format!(
                "  {}  {}",
                entry.qualified_name(),
                entry.handler.signature()
            )
        })
        .collect()
}

pub struct Repl<'r, R, W> {
    registry: &'r Registry,
    input: R,
    output: W,
    banner: bool,
}

impl<'r, R: BufRead, W: Write> Repl<'r, R, W> {
    pub fn new(registry: &'r Registry, input: R, output: W) -> Self {
        Self {
            registry,
            input,
            output,
            banner: true,
        }
    }

    pub fn with_banner(mut self, banner: bool) -> Self {
        self.banner = banner;
        self
    }

    /// Run until `exit`, end of input, or a read error. Only failures to
    /// write to the output are returned as errors.
    pub fn run(&mut self) -> io::Result<LoopExit> {
        if self.banner {
            writeln!(self.output, "{BANNER}")?;
        }

        let mut line = String::new();
        loop {
            write!(self.output, "{PROMPT}")?;
            self.output.flush()?;

            line.clear();
            match self.input.read_line(&mut line) {
                Ok(0) => {
                    writeln!(self.output)?;
                    return Ok(LoopExit::EndOfInput);
                }
                Ok(_) => {}
                Err(e) => {
                    writeln!(self.output, "\ninput error: {e}")?;
                    return Ok(LoopExit::InputError);
                }
            }

            match classify_line(&line) {
                Ok(LineCommand::Empty) => {}
                Ok(LineCommand::Exit) => {
                    writeln!(self.output, "bye")?;
                    return Ok(LoopExit::Requested);
                }
                Ok(LineCommand::Help) => writeln!(self.output, "{HELP}")?,
                Ok(LineCommand::List) => self.print_listing()?,
                Ok(LineCommand::Invoke(cmd)) => self.execute(&cmd)?,
                Err(err) => writeln!(self.output, "{}", render_error(&err))?,
            }
        }
    }

    fn print_listing(&mut self) -> io::Result<()> {
        writeln!(self.output, "Available functions:")?;
        for line in function_listing(self.registry) {
            writeln!(self.output, "{line}")?;
        }
        Ok(())
    }

    fn execute(&mut self, cmd: &ParsedCommand) -> io::Result<()> {
        match dispatch(self.registry, cmd) {
            Ok(values) => {
                for value in values {
                    writeln!(self.output, "{value}")?;
                }
            }
            Err(err) => writeln!(self.output, "{}", render_error(&err))?,
        }
        Ok(())
    }
}
