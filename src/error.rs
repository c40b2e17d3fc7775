//! Error types for the Billyprints logic core.
//!
//! Parsing a script never fails: malformed lines become
//! [`Diagnostic`](crate::dsl::Diagnostic)s on the parse result. The
//! [`BillyprintsError`] enum covers the remaining fallible operations, such as
//! reading script files, strict evaluation and front-end input handling.

use thiserror::Error;

/// Result type alias using [`BillyprintsError`].
pub type Result<T> = std::result::Result<T, BillyprintsError>;

/// Unified error type for all Billyprints operations.
#[derive(Error, Debug)]
pub enum BillyprintsError {
    // ============ Script Errors ============
    /// Strict mode rejected a script that produced parse diagnostics
    #[error("Script has {count} diagnostic(s), first: {first}")]
    Diagnostics { count: usize, first: String },

    /// No built-in demo circuit with this id
    #[error("Unknown demo circuit '{id}'")]
    UnknownDemo { id: String },

    // ============ Evaluation Errors ============
    /// Relaxation hit the iteration cap while values were still changing
    #[error("Circuit did not settle after {iterations} iterations (combinational feedback?)")]
    ConvergenceFailure { iterations: usize },

    /// Malformed `ID=VALUE` input assignment
    #[error("Invalid input assignment '{assignment}': {message}")]
    InvalidAssignment { assignment: String, message: String },

    // ============ I/O Errors ============
    /// Error reading a script file
    #[error("Failed to read script file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to encode a result as JSON
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BillyprintsError {
    /// Create an invalid assignment error
    pub fn invalid_assignment(assignment: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidAssignment {
            assignment: assignment.into(),
            message: message.into(),
        }
    }

    /// Create a convergence failure error
    pub fn convergence_failure(iterations: usize) -> Self {
        Self::ConvergenceFailure { iterations }
    }
}
