//! Splits one input line into tokens, honoring single and double quotes.

use crate::error::{DispatchError, Result};

/// Split `input` on unquoted spaces.
///
/// - `'` and `"` open a quoted region that only the same character closes;
///   the other quote character inside it is literal.
/// - Only the plain space separates tokens. Tabs and newlines are ordinary
///   characters.
/// - Runs of spaces never produce empty tokens, and neither does a quoted
///   empty string (`''`).
/// - End of input inside quotes is [`DispatchError::UnterminatedQuote`].
pub fn split_command(input: &str) -> Result<Vec<String>> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for c in input.chars() {
        match (c, quote) {
            ('"' | '\'', None) => quote = Some(c),
            ('"' | '\'', Some(open)) if open == c => quote = None,
            (' ', None) => {
                if !current.is_empty() {
                    parts.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }

    if quote.is_some() {
        return Err(DispatchError::UnterminatedQuote);
    }

    if !current.is_empty() {
        parts.push(current);
    }

    Ok(parts)
}

/// Quote a token so that [`split_command`] reads it back unchanged.
pub fn quote_token(token: &str) -> String {
    let needs_quotes = token.is_empty() || token.contains([' ', '\'', '"']);
    if !needs_quotes {
        return token.to_string();
    }
    if token.contains('\'') && !token.contains('"') {
        format!("\"{token}\"")
    } else {
        format!("'{token}'")
    }
}

/// Inverse of [`split_command`]. A token containing both quote characters
/// has no quoted form and will not survive the round trip.
pub fn join_command(tokens: &[String]) -> String {
    tokens
        .iter()
        .map(|t| quote_token(t))
        .collect::<Vec<_>>()
        .join(" ")
}
