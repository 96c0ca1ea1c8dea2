use std::io;
use std::ops::Range;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GroError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid atom count on line {line} (value: '{value}')")]
    MalformedHeader { line: usize, value: String },
    #[error("Parse error on line {line}: {kind}")]
    MalformedRecord { line: usize, kind: RecordErrorKind },
    #[error("Invalid box on line {line}: '{token}' is not a number")]
    MalformedBox { line: usize, token: String },
    #[error("Expected {expected} atom records but the file ends after {found}")]
    Truncated { expected: usize, found: usize },
    #[error("Value {value} does not fit the {width}-column {field} field")]
    FieldOverflow {
        field: &'static str,
        value: i64,
        width: usize,
    },
    #[error("Unsupported coordinate precision {0} (must be between 1 and {max})", max = super::MAX_PRECISION)]
    InvalidPrecision(usize),
    #[error("Cannot write to '{path}': {reason}", path = path.display())]
    InvalidDestination { path: PathBuf, reason: &'static str },
    #[error("Inconsistent system: {0}")]
    Inconsistency(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingField { columns: String },
    #[error("Expected two decimal points in the coordinate columns")]
    MissingDecimalPoint,
    #[error("Decimal points are {spacing} columns apart, too close for a coordinate field")]
    InvalidLayout { spacing: usize },
}

/// Renders a zero-based column range as the one-based inclusive span used in messages.
pub(crate) fn columns(range: &Range<usize>) -> String {
    format!("{}-{}", range.start + 1, range.end)
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("'{token}' is not a number")]
pub struct BoxTokenError {
    pub token: String,
}
