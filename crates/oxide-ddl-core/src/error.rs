//! Error types for schema compilation.

/// Errors that can occur while compiling or executing schema DDL.
#[derive(Debug, thiserror::Error)]
pub enum DdlError {
    /// The schema could not be used (unparsable input, no fields, empty table name).
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// A field definition reached the column compiler without a name.
    #[error("Column name not defined.")]
    MissingFieldName,

    /// The abstract column type has no entry in the dialect's type registry.
    #[error("Column type `{0}` does not exist.")]
    UnknownColumnType(String),

    /// The execution collaborator rejected a statement.
    #[error("Statement execution failed: {0}")]
    Execution(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type for schema compilation.
pub type Result<T> = std::result::Result<T, DdlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_type_message_names_the_type() {
        let err = DdlError::UnknownColumnType("varchar(255)".to_string());
        assert_eq!(err.to_string(), "Column type `varchar(255)` does not exist.");
    }

    #[test]
    fn test_execution_keeps_source() {
        let io = std::io::Error::other("disk full");
        let err = DdlError::Execution(Box::new(io));
        assert_eq!(err.to_string(), "Statement execution failed: disk full");
        assert!(std::error::Error::source(&err).is_some());
    }
}
