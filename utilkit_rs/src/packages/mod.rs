//! Utility packages and the bootstrap that registers them.
//!
//! Each package exposes a `register_into` function. Packages never depend on
//! one another having registered first.

pub mod fileutil;
pub mod strutil;

use crate::config::UtilkitConfig;
use crate::registry::{BatchReport, Registry};

/// Register every built-in package, in no meaningful order.
pub fn register_all(registry: &Registry, config: &UtilkitConfig) -> Vec<BatchReport> {
    vec![
        strutil::register_into(registry),
        fileutil::register_into(registry, config.report_dir.clone()),
    ]
}
