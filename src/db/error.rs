//! Database error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// Which layer of persistence failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum DbErrorKind {
    /// Opening the database file.
    #[display("connection")]
    Connection,
    /// Running embedded migrations.
    #[display("migration")]
    Migration,
    /// A query or statement.
    #[display("query")]
    Query,
    /// Encoding the result log.
    #[display("serialization")]
    Serialization,
    /// A non-SQL blob backend.
    #[display("backend")]
    Backend,
}

/// Persistence error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Database {} error: {} at {}:{}", kind, message, file, line)]
pub struct DbError {
    /// Failing layer.
    pub kind: DbErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DbError {
    /// Creates a new error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: DbErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<diesel::result::Error> for DbError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(DbErrorKind::Query, err.to_string())
    }
}

impl From<diesel::ConnectionError> for DbError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(DbErrorKind::Connection, err.to_string())
    }
}

impl From<serde_json::Error> for DbError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(DbErrorKind::Serialization, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_caller_location() {
        let err = DbError::new(DbErrorKind::Backend, "boom");
        assert!(err.file.ends_with("error.rs"));
        assert!(err.line > 0);
        assert!(err.to_string().starts_with("Database backend error: boom at"));
    }
}
