//! Function registry and dynamic invocation.
//!
//! The registry maps `package:name` keys to [`HandlerEntry`] values. Utility
//! packages fill it once at start-up through [`Registry::batch_register`];
//! afterwards it is only read. Registration takes the write lock, lookups and
//! invocations take the read lock just long enough to clone the handler, so
//! concurrent invocations never block each other.
//!
//! ```rust
//! use utilkit::registry::{Candidate, Registry};
//!
//! let registry = Registry::new();
//! registry.batch_register("strutil", vec![
//!     Candidate::new("Shout", |s: String| s.to_uppercase()),
//!     Candidate::new("whisper", |s: String| s.to_lowercase()),
//! ]);
//!
//! assert!(registry.lookup("strutil", "Shout").is_some());
//! assert!(registry.lookup("strutil", "whisper").is_none());
//!
//! let out = registry.invoke("strutil", "Shout", &["hey".to_string()]).unwrap();
//! assert_eq!(out, vec!["HEY"]);
//! ```

mod handler;
pub mod visibility;

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use tracing::{debug, info, warn};

use crate::error::{DispatchError, Result};

pub use handler::{FromArg, Handler, IntoHandler, IntoOutcome, Outcome};
pub use visibility::Visibility;

/// One invocable unit.
#[derive(Debug, Clone)]
pub struct HandlerEntry {
    pub package: String,
    pub name: String,
    pub handler: Handler,
}

impl HandlerEntry {
    /// `package:name`, the form users type.
    pub fn qualified_name(&self) -> String {
        registry_key(&self.package, &self.name)
    }
}

/// A function offered for registration under a declared name.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub name: String,
    pub handler: Handler,
}

impl Candidate {
    pub fn new<Args, F>(name: impl Into<String>, func: F) -> Self
    where
        F: IntoHandler<Args>,
    {
        Self {
            name: name.into(),
            handler: Handler::new(func),
        }
    }
}

/// Result of registering one package's candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub package: String,
    pub total: usize,
    pub registered: usize,
}

impl BatchReport {
    pub fn all_registered(&self) -> bool {
        self.registered == self.total
    }
}

pub struct Registry {
    entries: RwLock<HashMap<String, HandlerEntry>>,
    visibility: Visibility,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("entries", &self.len())
            .finish_non_exhaustive()
    }
}

fn registry_key(package: &str, name: &str) -> String {
    format!("{package}:{name}")
}

impl Registry {
    /// Empty registry using the [`visibility::exported`] name filter.
    pub fn new() -> Self {
        Self::with_visibility(visibility::exported)
    }

    pub fn with_visibility(visibility: Visibility) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            visibility,
        }
    }

    /// Insert or overwrite `package:name`. Returns `false` without touching
    /// the table when the name does not pass the visibility filter.
    pub fn register(&self, package: &str, candidate: Candidate) -> bool {
        if !(self.visibility)(&candidate.name) {
            debug!(package, name = %candidate.name, "skipping hidden candidate");
            return false;
        }

        let key = registry_key(package, &candidate.name);
        let entry = HandlerEntry {
            package: package.to_string(),
            name: candidate.name,
            handler: candidate.handler,
        };

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.insert(key.clone(), entry).is_some() {
            debug!(key = %key, "replaced existing handler");
        }
        true
    }

    /// Register every candidate, logging whether the whole batch made it.
    /// Partial failure is reported, never fatal.
    pub fn batch_register(&self, package: &str, candidates: Vec<Candidate>) -> BatchReport {
        let total = candidates.len();
        let registered = candidates
            .into_iter()
            .map(|candidate| self.register(package, candidate))
            .filter(|ok| *ok)
            .count();

        let report = BatchReport {
            package: package.to_string(),
            total,
            registered,
        };

        if report.all_registered() {
            info!(package, registered, "register success");
        } else {
            warn!(package, registered, total, "register failed");
        }
        report
    }

    pub fn lookup(&self, package: &str, function: &str) -> Option<Handler> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(&registry_key(package, function))
            .map(|entry| entry.handler.clone())
    }

    /// Snapshot of all entries in no particular order.
    pub fn list_all(&self) -> Vec<HandlerEntry> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up `package:function`, check arity, call it and return the
    /// rendered values in return order.
    pub fn invoke(&self, package: &str, function: &str, args: &[String]) -> Result<Vec<String>> {
        let handler = self
            .lookup(package, function)
            .ok_or_else(|| DispatchError::NotFound {
                package: package.to_string(),
                function: function.to_string(),
            })?;

        if handler.arity() != args.len() {
            return Err(DispatchError::ArityMismatch {
                expected: handler.arity(),
                actual: args.len(),
            });
        }

        debug!(package, function, args = args.len(), "invoking");
        match handler.call(args)? {
            Outcome::Values(values) => Ok(values),
            Outcome::Failed(err) => Err(DispatchError::from_handler(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn trim_registry() -> Registry {
        let registry = Registry::new();
        registry.batch_register(
            "strutil",
            vec![
                Candidate::new("Trim", |s: String| s.trim().to_string()),
                Candidate::new("ToUpper", |s: String| s.to_uppercase()),
            ],
        );
        registry
    }

    #[test]
    fn lookup_before_registration_is_not_found() {
        let registry = Registry::new();
        assert!(registry.lookup("strutil", "Trim").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn lower_case_candidates_are_skipped() {
        let registry = Registry::new();
        assert!(!registry.register("strutil", Candidate::new("toUpper", |s: String| s)));
        assert!(registry.lookup("strutil", "toUpper").is_none());

        assert!(registry.register("strutil", Candidate::new("ToUpper", |s: String| s)));
        assert!(registry.lookup("strutil", "ToUpper").is_some());
    }

    #[test]
    fn empty_names_are_skipped() {
        let registry = Registry::new();
        assert!(!registry.register("strutil", Candidate::new("", || ())));
        assert!(registry.is_empty());
    }

    #[test]
    fn visibility_policy_is_swappable() {
        let registry = Registry::with_visibility(visibility::any_named);
        assert!(registry.register("strutil", Candidate::new("toUpper", |s: String| s)));
        assert!(registry.lookup("strutil", "toUpper").is_some());
    }

    #[test]
    fn duplicate_registration_last_wins() {
        let registry = Registry::new();
        registry.register("pkg", Candidate::new("Get", || "first"));
        registry.register("pkg", Candidate::new("Get", || "second"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.invoke("pkg", "Get", &[]).unwrap(), vec!["second"]);
    }

    #[test]
    fn batch_report_counts_skipped_candidates() {
        let registry = Registry::new();
        let report = registry.batch_register(
            "mixed",
            vec![
                Candidate::new("Good", || ()),
                Candidate::new("bad", || ()),
            ],
        );
        assert_eq!(report.total, 2);
        assert_eq!(report.registered, 1);
        assert!(!report.all_registered());
        assert!(registry.lookup("mixed", "Good").is_some());
    }

    #[test]
    fn invoke_trim() {
        let registry = trim_registry();
        let out = registry
            .invoke("strutil", "Trim", &strings(&["  hi  "]))
            .expect("invoke");
        assert_eq!(out, vec!["hi"]);
    }

    #[test]
    fn invoke_reports_arity_mismatch() {
        let registry = trim_registry();
        let err = registry
            .invoke("strutil", "Trim", &strings(&["a", "b"]))
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::ArityMismatch {
                expected: 1,
                actual: 2
            }
        ));
    }

    #[test]
    fn invoke_unknown_is_not_found() {
        let registry = trim_registry();
        let err = registry.invoke("nosuch", "Fn", &[]).unwrap_err();
        match err {
            DispatchError::NotFound { package, function } => {
                assert_eq!(package, "nosuch");
                assert_eq!(function, "Fn");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn invoke_surfaces_handler_errors() {
        let registry = Registry::new();
        registry.register(
            "math",
            Candidate::new("Div", |a: i64, b: i64| -> anyhow::Result<i64> {
                if b == 0 {
                    anyhow::bail!("division by zero");
                }
                Ok(a / b)
            }),
        );
        assert_eq!(
            registry.invoke("math", "Div", &strings(&["9", "3"])).unwrap(),
            vec!["3"]
        );
        let err = registry
            .invoke("math", "Div", &strings(&["1", "0"]))
            .unwrap_err();
        assert!(matches!(err, DispatchError::Handler(ref m) if m == "division by zero"));
    }

    #[test]
    fn list_all_is_stable_as_a_set() {
        let registry = trim_registry();
        let first: HashSet<String> = registry
            .list_all()
            .iter()
            .map(HandlerEntry::qualified_name)
            .collect();
        let second: HashSet<String> = registry
            .list_all()
            .iter()
            .map(HandlerEntry::qualified_name)
            .collect();
        assert_eq!(first, second);
        assert!(first.contains("strutil:Trim"));
        assert!(first.contains("strutil:ToUpper"));
    }

    #[test]
    fn concurrent_registration_and_invocation() {
        let registry = Arc::new(Registry::new());
        let writers: Vec<_> = ["alpha", "beta", "gamma"]
            .into_iter()
            .map(|package| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    registry.batch_register(
                        package,
                        vec![Candidate::new("Name", move || package.to_string())],
                    )
                })
            })
            .collect();
        for writer in writers {
            assert!(writer.join().expect("writer thread").all_registered());
        }

        let readers: Vec<_> = ["alpha", "beta", "gamma"]
            .into_iter()
            .map(|package| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.invoke(package, "Name", &[]))
            })
            .collect();
        for (reader, package) in readers.into_iter().zip(["alpha", "beta", "gamma"]) {
            let out = reader.join().expect("reader thread").expect("invoke");
            assert_eq!(out, vec![package]);
        }
    }
}
