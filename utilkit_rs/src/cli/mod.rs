//! Command-line front end.
//!
//! # Architecture
//!
//! ```text
//! input line ──► splitter ──► command ──► registry.invoke ──► printed values
//!                (tokens)    (meta or       (arity check,      or one error
//!                             package:fn)    conversion, call)  line
//! ```
//!
//! - [`splitter`] - quote-aware tokenizer
//! - [`command`] - meta-command recognition and `package:function` parsing
//! - [`repl`] - the interactive loop
//! - [`entrypoint`] - start-up shared by the binary
//! - [`help_texts`] - banner and help output

pub mod command;
pub mod entrypoint;
pub mod help_texts;
pub mod repl;
pub mod splitter;

pub use command::{LineCommand, ParsedCommand, classify_line, parse_tokens, split_target};
pub use repl::{LoopExit, Repl, dispatch};
pub use splitter::{join_command, split_command};
