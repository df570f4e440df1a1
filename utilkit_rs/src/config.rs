//! Configuration file support for utilkit.
//!
//! Loads optional `.utilkit/config.toml` from the working directory.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::types::ColorMode;

pub const DEFAULT_REPORT_DIR: &str = "tmp";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UtilkitConfig {
    /// Directory (relative to the working directory) that saved reports land in.
    pub report_dir: PathBuf,
    pub color: ColorMode,
    /// Tracing filter, e.g. `debug` or `utilkit=trace`.
    pub log_level: Option<String>,
    /// Print the welcome banner when the interactive loop starts.
    pub banner: bool,
}

impl Default for UtilkitConfig {
    fn default() -> Self {
        Self {
            report_dir: PathBuf::from(DEFAULT_REPORT_DIR),
            color: ColorMode::Auto,
            log_level: None,
            banner: true,
        }
    }
}

impl UtilkitConfig {
    /// Load config from `.utilkit/config.toml` in the given root directory.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(".utilkit").join("config.toml");
        Self::load_from_path(&config_path)
    }

    /// Load config from a specific path.
    ///
    /// Runs before the tracing subscriber exists, so problems go straight to stderr.
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("[utilkit][warn] Failed to parse {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[utilkit][warn] Failed to read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
