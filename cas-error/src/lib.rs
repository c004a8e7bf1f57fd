//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, and the [`Error`] type that attaches those messages to regions of a rendered
//! expression.

// lets `#[derive(ErrorKind)]` refer to this crate by name in its own tests
extern crate self as cas_error;

use ariadne::{Color, Report};
use std::{fmt::Debug, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send {
    /// The one-line message describing this error.
    fn message(&self) -> String;

    /// Builds the report for this error.
    ///
    /// One label is attached per span. If no spans are given, the report has no labels and
    /// points at the start of the source.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source text that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source text that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use ariadne::Source;
    use cas_attrs::ErrorKind;
    use super::*;

    #[derive(Debug, ErrorKind)]
    #[error(
        message = format!("cannot take the logarithm of `{}`", value),
        labels = ["this argument"],
        help = "the argument must be positive",
    )]
    struct NegativeLog {
        value: i32,
    }

    #[derive(Debug, ErrorKind)]
    #[error(message = "nothing to point at", labels = ["unused"])]
    struct Unlabeled;

    /// Renders the report to a string without color codes.
    fn render(error: &Error, src: &str) -> String {
        let mut out = Vec::new();
        error.build_report("input")
            .write(("input", Source::from(src)), &mut out)
            .unwrap();
        String::from_utf8(strip_ansi_escapes::strip(out)).unwrap()
    }

    #[test]
    fn report_contains_message_and_label() {
        let src = "ln(-2)";
        let error = Error::new(vec![3..5], NegativeLog { value: -2 });
        assert_eq!(error.to_string(), "cannot take the logarithm of `-2`");

        let report = render(&error, src);
        assert!(report.contains("cannot take the logarithm of `-2`"));
        assert!(report.contains("this argument"));
        assert!(report.contains("the argument must be positive"));
    }

    #[test]
    fn report_without_spans() {
        let error = Error::new(Vec::new(), Unlabeled);
        let report = render(&error, "x + 1");
        assert!(report.contains("nothing to point at"));
        assert!(!report.contains("unused"));
    }
}
