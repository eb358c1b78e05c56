use thiserror::Error;

/// Errors raised while reading result rows or building query templates.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("Missing column in result row: {column}")]
    MissingColumn { column: String },

    #[error("Column {column} holds a {found}, expected a {expected}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Invalid {kind} identifier: {name:?}")]
    InvalidIdentifier { kind: &'static str, name: String },
}
