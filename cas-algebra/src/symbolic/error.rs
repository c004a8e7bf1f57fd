//! Errors that can occur when evaluating or differentiating an [`Expr`](super::Expr).
//!
//! Each kind of error is its own struct implementing [`ErrorKind`], so that it can be reported
//! with [`ariadne`] against the rendered expression. The [`Error`] enum wraps all of them and is
//! what the fallible operations of this crate return.

use cas_attrs::ErrorKind;
use cas_error::ErrorKind;
use std::ops::Range;

/// A variable was evaluated without a value bound to it.
#[derive(Debug, Clone, PartialEq, Eq, ErrorKind)]
#[error(
    message = format!("undefined variable: `{}`", name),
    labels = ["this variable"],
    help = "bind a value to the variable before evaluating the expression",
)]
pub struct UndefinedVariable {
    /// The name of the variable.
    pub name: String,
}

/// A function or operator was evaluated outside of its domain.
#[derive(Debug, Clone, PartialEq, Eq, ErrorKind)]
#[error(
    message = format!("`{}` is undefined for the argument `{}`", function, argument),
    labels = ["evaluated here"],
    help = "the result is not a finite real number",
)]
pub struct DomainError {
    /// The function or operator, such as `ln` or `^`.
    pub function: String,

    /// The value of the offending argument.
    pub argument: String,
}

/// A function was called with the wrong number of arguments.
#[derive(Debug, Clone, PartialEq, Eq, ErrorKind)]
#[error(
    message = format!("wrong number of arguments to `{}`", function),
    labels = [format!("expected {} argument(s), found {}", expected, given)],
)]
pub struct ArityError {
    /// The name of the function.
    pub function: String,

    /// The number of arguments the function accepts.
    pub expected: usize,

    /// The number of arguments that were given.
    pub given: usize,
}

/// A function that is not known to the evaluator was called.
#[derive(Debug, Clone, PartialEq, Eq, ErrorKind)]
#[error(
    message = format!("unknown function `{}`", name),
    labels = ["this function"],
    help = if suggestions.is_empty() {
        String::from("see the list of supported functions in the documentation")
    } else {
        format!("did you mean: {}", suggestions.iter().map(|s| format!("`{}`", s)).collect::<Vec<_>>().join(", "))
    },
)]
pub struct UnknownFunction {
    /// The name of the function.
    pub name: String,

    /// Names of known functions that are similar to the one that was called.
    pub suggestions: Vec<String>,
}

/// The derivative of an expression could not be computed symbolically.
#[derive(Debug, Clone, PartialEq, Eq, ErrorKind)]
#[error(
    message = format!("cannot differentiate `{}`", expr),
    labels = [reason.as_str()],
)]
pub struct UnsupportedDifferentiation {
    /// The rendered sub-expression that could not be differentiated.
    pub expr: String,

    /// Why it could not be differentiated.
    pub reason: String,
}

/// A negative derivative order was requested.
#[derive(Debug, Clone, PartialEq, Eq, ErrorKind)]
#[error(
    message = format!("invalid derivative order: {}", order),
    labels = ["in this expression"],
    help = "the order of a derivative must be zero or positive",
)]
pub struct InvalidDerivativeOrder {
    /// The requested order.
    pub order: i64,
}

/// Any error produced by evaluation or differentiation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    UndefinedVariable(UndefinedVariable),
    Domain(DomainError),
    Arity(ArityError),
    UnknownFunction(UnknownFunction),
    UnsupportedDifferentiation(UnsupportedDifferentiation),
    InvalidDerivativeOrder(InvalidDerivativeOrder),
}

impl Error {
    /// Returns the wrapped error kind.
    pub fn kind(&self) -> &dyn ErrorKind {
        match self {
            Self::UndefinedVariable(e) => e,
            Self::Domain(e) => e,
            Self::Arity(e) => e,
            Self::UnknownFunction(e) => e,
            Self::UnsupportedDifferentiation(e) => e,
            Self::InvalidDerivativeOrder(e) => e,
        }
    }

    /// The text in a rendered expression that this error should point to.
    fn culprit(&self) -> Option<String> {
        match self {
            Self::UndefinedVariable(e) => Some(e.name.clone()),
            Self::Domain(e) => Some(e.function.clone()),
            Self::Arity(e) => Some(format!("{}(", e.function)),
            Self::UnknownFunction(e) => Some(format!("{}(", e.name)),
            Self::UnsupportedDifferentiation(e) => Some(e.expr.clone()),
            Self::InvalidDerivativeOrder(_) => None,
        }
    }

    /// Finds the region of `source` that this error points to.
    ///
    /// `source` is expected to be the rendering of the expression that produced the error. If the
    /// culprit cannot be found in it, no region is returned.
    pub fn spans(&self, source: &str) -> Vec<Range<usize>> {
        match self.culprit() {
            Some(culprit) => source.find(&culprit)
                .map(|start| {
                    // point at the name only, not the opening parenthesis
                    let len = culprit.trim_end_matches('(').len();
                    vec![start..start + len]
                })
                .unwrap_or_default(),
            None => vec![0..source.len()],
        }
    }

    /// Converts this error into a [`cas_error::Error`] pointing into `source`, which can then be
    /// turned into an [`ariadne`] report.
    pub fn into_spanned(self, source: &str) -> cas_error::Error {
        let spans = self.spans(source);
        match self {
            Self::UndefinedVariable(e) => cas_error::Error::new(spans, e),
            Self::Domain(e) => cas_error::Error::new(spans, e),
            Self::Arity(e) => cas_error::Error::new(spans, e),
            Self::UnknownFunction(e) => cas_error::Error::new(spans, e),
            Self::UnsupportedDifferentiation(e) => cas_error::Error::new(spans, e),
            Self::InvalidDerivativeOrder(e) => cas_error::Error::new(spans, e),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind().message())
    }
}

impl std::error::Error for Error {}

macro_rules! impl_from_kind {
    ($($kind:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$kind> for Error {
                fn from(e: $kind) -> Self {
                    Self::$variant(e)
                }
            }
        )*
    };
}

impl_from_kind! {
    UndefinedVariable => UndefinedVariable,
    DomainError => Domain,
    ArityError => Arity,
    UnknownFunction => UnknownFunction,
    UnsupportedDifferentiation => UnsupportedDifferentiation,
    InvalidDerivativeOrder => InvalidDerivativeOrder,
}
