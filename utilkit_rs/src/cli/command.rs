//! Classification of one input line into a meta-command or a dispatch.

use super::splitter::split_command;
use crate::error::{DispatchError, Result};

/// A dispatch request: `package:function arg...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub package: String,
    pub function: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineCommand {
    /// Blank line; re-prompt.
    Empty,
    /// `exit` or `quit`.
    Exit,
    Help,
    List,
    Invoke(ParsedCommand),
}

/// Classify a raw input line. Meta-commands are matched case-sensitively
/// against the whole trimmed line.
pub fn classify_line(line: &str) -> Result<LineCommand> {
    let line = line.trim();
    match line {
        "" => Ok(LineCommand::Empty),
        "exit" | "quit" => Ok(LineCommand::Exit),
        "help" => Ok(LineCommand::Help),
        "list" => Ok(LineCommand::List),
        _ => {
            let tokens = split_command(line)?;
            Ok(parse_tokens(tokens)?.map_or(LineCommand::Empty, LineCommand::Invoke))
        }
    }
}

/// Build a dispatch request from already split tokens. No tokens means
/// nothing to do.
pub fn parse_tokens(tokens: Vec<String>) -> Result<Option<ParsedCommand>> {
    let mut tokens = tokens.into_iter();
    let Some(target) = tokens.next() else {
        return Ok(None);
    };
    let (package, function) = split_target(&target)?;
    Ok(Some(ParsedCommand {
        package,
        function,
        args: tokens.collect(),
    }))
}

/// Split `package:function` on its single colon. Both halves must be non-empty.
pub fn split_target(target: &str) -> Result<(String, String)> {
    let mut halves = target.split(':');
    match (halves.next(), halves.next(), halves.next()) {
        (Some(package), Some(function), None) if !package.is_empty() && !function.is_empty() => {
            Ok((package.to_string(), function.to_string()))
        }
        _ => Err(DispatchError::MalformedCommand(target.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_meta_commands() {
        assert_eq!(classify_line("exit").unwrap(), LineCommand::Exit);
        assert_eq!(classify_line("  quit  ").unwrap(), LineCommand::Exit);
        assert_eq!(classify_line("help").unwrap(), LineCommand::Help);
        assert_eq!(classify_line("list").unwrap(), LineCommand::List);
        assert_eq!(classify_line("   ").unwrap(), LineCommand::Empty);
    }

    #[test]
    fn meta_commands_are_case_sensitive() {
        assert!(matches!(
            classify_line("EXIT"),
            Err(DispatchError::MalformedCommand(_))
        ));
    }

    #[test]
    fn parses_invocation_with_quoted_args() {
        let cmd = classify_line("strutil:Trim '  hello  '").unwrap();
        assert_eq!(
            cmd,
            LineCommand::Invoke(ParsedCommand {
                package: "strutil".into(),
                function: "Trim".into(),
                args: vec!["  hello  ".into()],
            })
        );
    }

    #[test]
    fn rejects_wrong_colon_counts() {
        for bad in ["strutil", "a:b:c", ":Trim", "strutil:", ":"] {
            assert!(
                matches!(split_target(bad), Err(DispatchError::MalformedCommand(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn parse_errors_surface_from_the_splitter() {
        assert!(matches!(
            classify_line("strutil:Trim 'oops"),
            Err(DispatchError::UnterminatedQuote)
        ));
    }

    #[test]
    fn no_tokens_is_nothing_to_do() {
        assert_eq!(parse_tokens(Vec::new()).unwrap(), None);
        assert_eq!(classify_line("''").unwrap(), LineCommand::Empty);
    }
}
