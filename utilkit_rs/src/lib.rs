//! # utilkit
//!
//! Interactive harness for small utility functions. Each utility package
//! registers its functions into a [`registry::Registry`] under
//! `package:Function` names; the user invokes them by typing
//!
//! ```text
//! > strutil:Trim '  hello  '
//! hello
//! ```
//!
//! ## Library Usage
//!
//! ```rust
//! use utilkit::config::UtilkitConfig;
//! use utilkit::packages;
//! use utilkit::registry::Registry;
//!
//! let registry = Registry::new();
//! packages::register_all(&registry, &UtilkitConfig::default());
//!
//! let out = registry
//!     .invoke("strutil", "ToUpper", &["hello".to_string()])
//!     .unwrap();
//! assert_eq!(out, vec!["HELLO"]);
//! ```

// ============================================================================
// Core Modules
// ============================================================================

/// Handler table, typed wrappers and invocation.
pub mod registry;

/// Built-in utility packages (`strutil`, `fileutil`) and their bootstrap.
pub mod packages;

/// Tokenizer, line classification, interactive loop and binary entry point.
pub mod cli;

// ============================================================================
// Support
// ============================================================================

pub mod colors;
pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use error::DispatchError;
pub use registry::{Candidate, Handler, HandlerEntry, Registry};
pub use types::ColorMode;
