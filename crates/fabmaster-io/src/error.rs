use std::io;

use thiserror::Error;

/// Failures that stop a read. Everything else is reported as a
/// [`Diagnostic`](crate::Diagnostic) and the read carries on.
#[derive(Error, Debug)]
pub enum FabmasterError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Why a data row could not be turned into its section's record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("missing field {0}")]
    MissingField(String),

    #[error("field {field} is not a number: '{value}'")]
    InvalidNumber { field: String, value: String },
}
