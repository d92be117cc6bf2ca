//! Error types shared by every stage of the plotting pipeline.

use std::io;

use thiserror::Error;

use crate::output::OutputName;
use crate::value::ValueKind;

/// Errors produced while parsing, shaping or rendering benchmark results.
///
/// Every stage returns its error up to the caller; nothing is retried.
/// Wrappers added by the orchestrator can be peeled off with [`Error::root`].
#[derive(Debug, Error)]
pub enum Error {
    /// The benchmark identifier does not look like `Benchmark<Name>[/...][-N]`.
    #[error("info string '{0}' didn't match the benchmark name pattern")]
    MalformedName(String),

    /// A result has no parameter with the requested name.
    #[error("no input found with name: '{0}'")]
    UnknownInput(String),

    /// The requested output is not one of the recognized output names.
    #[error("no output found with name: '{0}'")]
    UnknownOutputName(String),

    /// The output is recognized but was not recorded for this result.
    #[error("output '{0}' was not measured")]
    UnmeasuredOutput(OutputName),

    /// A value destined for a numeric axis is not numeric.
    #[error("unexpected kind: '{0}'")]
    UnsupportedValueKind(ValueKind),

    /// No plot kinds were requested and none could be inferred from the data.
    #[error("could not determine default plot type")]
    NoDefaultPlotKind,

    /// A requested plot kind is not recognized.
    #[error("unknown plot type: {0}")]
    UnknownPlotKind(String),

    /// A filter expression could not be parsed.
    #[error("invalid filter expression '{expr}': {reason}")]
    InvalidFilter { expr: String, reason: &'static str },

    /// A filter compares values that cannot be compared with its operator.
    #[error("filter '{expr}' cannot compare {left} with {right}")]
    FilterMismatch {
        expr: String,
        left: ValueKind,
        right: ValueKind,
    },

    /// No benchmark with the requested name was parsed.
    #[error("no benches found with name: {0}")]
    UnknownBenchmark(String),

    /// The rendering backend failed.
    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    /// An error annotated with the pipeline stage it came from.
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Wrap this error with a short description of the failing stage.
    pub fn context(self, context: impl Into<String>) -> Self {
        Error::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// The originating error with all [`Error::Context`] layers removed.
    pub fn root(&self) -> &Error {
        let mut err = self;
        while let Error::Context { source, .. } = err {
            err = source;
        }
        err
    }
}

/// Extension for attaching stage context to a `Result`.
pub(crate) trait ResultExt<T> {
    fn context(self, context: &str) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: &str) -> Result<T> {
        self.map_err(|e| e.context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_unwraps_nested_context() {
        let err = Error::UnknownInput("delta".to_string())
            .context("error getting x value")
            .context("err splitting grouped results");

        assert!(matches!(err.root(), Error::UnknownInput(name) if name == "delta"));
        assert_eq!(
            err.to_string(),
            "err splitting grouped results: error getting x value: no input found with name: 'delta'"
        );
    }

    #[test]
    fn test_root_of_plain_error_is_itself() {
        let err = Error::NoDefaultPlotKind;
        assert!(matches!(err.root(), Error::NoDefaultPlotKind));
    }
}
