//! Typed handler wrappers.
//!
//! A [`Handler`] erases a plain Rust function of fixed arity behind a uniform
//! `&[String] -> Outcome` call. The wrapper records the parameter types,
//! converts each raw string into its native type, and turns the return value
//! into an [`Outcome`].
//!
//! ```rust
//! use utilkit::registry::Handler;
//!
//! let add = Handler::new(|a: i64, b: i64| a + b);
//! assert_eq!(add.arity(), 2);
//! assert_eq!(add.signature(), "(int, int)");
//! ```

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{DispatchError, Result};

/// Native parameter type that can be produced from one positional argument.
pub trait FromArg: Sized {
    /// Name shown in signatures and conversion errors.
    const TYPE_NAME: &'static str;

    fn from_arg(raw: &str) -> Option<Self>;
}

impl FromArg for String {
    const TYPE_NAME: &'static str = "string";

    fn from_arg(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

impl FromArg for i64 {
    const TYPE_NAME: &'static str = "int";

    fn from_arg(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }
}

impl FromArg for u64 {
    const TYPE_NAME: &'static str = "uint";

    fn from_arg(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }
}

impl FromArg for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_arg(raw: &str) -> Option<Self> {
        match raw {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
            _ => None,
        }
    }
}

impl FromArg for PathBuf {
    const TYPE_NAME: &'static str = "path";

    fn from_arg(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            None
        } else {
            Some(PathBuf::from(raw))
        }
    }
}

/// What a handler produced: either values to print or a failure.
///
/// A failed invocation carries no values.
#[derive(Debug)]
pub enum Outcome {
    Values(Vec<String>),
    Failed(anyhow::Error),
}

/// Return types a registered function may use.
pub trait IntoOutcome {
    fn into_outcome(self) -> Outcome;
}

impl IntoOutcome for () {
    fn into_outcome(self) -> Outcome {
        Outcome::Values(Vec::new())
    }
}

impl IntoOutcome for Vec<String> {
    fn into_outcome(self) -> Outcome {
        Outcome::Values(self)
    }
}

impl<T, E> IntoOutcome for std::result::Result<T, E>
where
    T: IntoOutcome,
    E: Into<anyhow::Error>,
{
    fn into_outcome(self) -> Outcome {
        match self {
            Ok(value) => value.into_outcome(),
            Err(err) => Outcome::Failed(err.into()),
        }
    }
}

macro_rules! display_outcome {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoOutcome for $ty {
                fn into_outcome(self) -> Outcome {
                    Outcome::Values(vec![self.to_string()])
                }
            }
        )*
    };
}

display_outcome!(String, &'static str, bool, i32, i64, u32, u64, usize, f64);

type Invoker = dyn Fn(&[String]) -> Result<Outcome> + Send + Sync;

/// A type-erased callable with a fixed number of string arguments.
#[derive(Clone)]
pub struct Handler {
    params: Vec<&'static str>,
    call: Arc<Invoker>,
}

impl Handler {
    pub fn new<Args, F>(func: F) -> Self
    where
        F: IntoHandler<Args>,
    {
        func.into_handler()
    }

    /// Number of positional arguments the handler expects.
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Human readable parameter list, e.g. `(string, int, bool)`.
    pub fn signature(&self) -> String {
        format!("({})", self.params.join(", "))
    }

    /// Run the handler. A slice of the wrong length is an
    /// [`DispatchError::ArityMismatch`]; no conversion is attempted.
    pub fn call(&self, args: &[String]) -> Result<Outcome> {
        if args.len() != self.arity() {
            return Err(DispatchError::ArityMismatch {
                expected: self.arity(),
                actual: args.len(),
            });
        }
        (self.call)(args)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Functions (and closures) that can be wrapped into a [`Handler`].
///
/// `Args` is the tuple of parameter types; it only exists to keep the
/// per-arity implementations apart.
pub trait IntoHandler<Args> {
    fn into_handler(self) -> Handler;
}

fn convert<T: FromArg>(position: usize, raw: &str) -> Result<T> {
    T::from_arg(raw).ok_or_else(|| DispatchError::InvalidArgument {
        position,
        expected: T::TYPE_NAME,
        value: raw.to_string(),
    })
}

macro_rules! impl_into_handler {
    ($($ty:ident),*) => {
        impl<Func, Ret, $($ty,)*> IntoHandler<($($ty,)*)> for Func
        where
            Func: Fn($($ty),*) -> Ret + Send + Sync + 'static,
            Ret: IntoOutcome,
            $($ty: FromArg,)*
        {
            #[allow(unused_mut, unused_variables)]
            fn into_handler(self) -> Handler {
                let params = vec![$(<$ty as FromArg>::TYPE_NAME),*];
                // Only reached through `Handler::call`, which checks the length.
                let call = move |args: &[String]| -> Result<Outcome> {
                    let mut position = 0usize;
                    Ok((self)($({
                        position += 1;
                        convert::<$ty>(position, &args[position - 1])?
                    }),*)
                    .into_outcome())
                };
                Handler {
                    params,
                    call: Arc::new(call),
                }
            }
        }
    };
}

impl_into_handler!();
impl_into_handler!(A);
impl_into_handler!(A, B);
impl_into_handler!(A, B, C);
impl_into_handler!(A, B, C, D);
impl_into_handler!(A, B, C, D, E);
