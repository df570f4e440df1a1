//! Name filters applied during registration.
//!
//! A candidate whose name fails the registry's filter is skipped, not
//! rejected with an error.

/// Predicate deciding whether a candidate name may be registered.
pub type Visibility = fn(&str) -> bool;

/// Default policy: a name is exported when it is non-empty and does not start
/// with a lower-case letter.
pub fn exported(name: &str) -> bool {
    match name.chars().next() {
        Some(first) => !first.is_lowercase(),
        None => false,
    }
}

/// Accept every non-empty name.
pub fn any_named(name: &str) -> bool {
    !name.is_empty()
}
