use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Error kinds
// ---------------------------------------------------------------------------

/// Convenience alias for results carrying a [`QueryError`].
pub type Result<T> = std::result::Result<T, QueryError>;

/// Everything that can go wrong during a query run.
///
/// Everything on the input side aborts the run. `OutputWriteFailure` is
/// reported per record and the scan moves on to the next point.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The input path does not resolve to a readable file.
    #[error("input file not found: {}", path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input file opened but could not be read to the end.
    #[error("failed to read input {}", path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A record has fewer than three fields.
    #[error("line {line}: missing '{field}' field")]
    MissingField { line: u64, field: &'static str },

    /// A field is not a floating-point number.
    #[error("line {line}: {field} '{text}' is not a number")]
    InvalidNumber {
        line: u64,
        field: &'static str,
        text: String,
    },

    /// A single matching record could not be appended.
    #[error("failed to append record to {}", path.display())]
    OutputWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl QueryError {
    /// Whether the driver may log this error and keep scanning.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, QueryError::OutputWriteFailure { .. })
    }
}
