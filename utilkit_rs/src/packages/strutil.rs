//! String helpers exposed as `strutil:*`.

use crate::registry::{BatchReport, Candidate, Registry};

pub const PACKAGE_NAME: &str = "strutil";

/// Characters stripped by `Trim`: ASCII blanks plus the ideographic space.
const TRIM_CHARS: &[char] = &[' ', '\t', '\n', '\r', '\u{3000}'];

pub fn trim(s: String) -> String {
    s.trim_matches(TRIM_CHARS).to_string()
}

pub fn to_upper(s: String) -> String {
    s.to_uppercase()
}

pub fn register_into(registry: &Registry) -> BatchReport {
    registry.batch_register(
        PACKAGE_NAME,
        vec![
            Candidate::new("Trim", trim),
            Candidate::new("ToUpper", to_upper),
        ],
    )
}
