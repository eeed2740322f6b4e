//! Error type shared by every stage of a statistics run.

use thiserror::Error;

/// Errors raised while loading inputs or querying the class registry.
#[derive(Debug, Error)]
pub enum StatsError {
    /// A class key that is not present in the registry was queried.
    #[error("Class not found: {0}")]
    ClassNotFound(String),

    /// Two class definitions share one key.
    #[error("Duplicate class key: {0}")]
    DuplicateClass(String),

    /// A class names a parent which is not defined.
    #[error("Class {class} refers to unknown parent {parent}")]
    UnknownParent { class: String, parent: String },

    /// A network record could not be parsed.
    #[error("Invalid edge on line {line}: {reason}")]
    InvalidEdge { line: usize, reason: String },

    /// The complex identifier pattern is not a valid regular expression.
    #[error("Invalid entity pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StatsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_key() {
        let err = StatsError::ClassNotFound("ligand".to_string());
        assert_eq!(err.to_string(), "Class not found: ligand");
    }

    #[test]
    fn invalid_edge_message() {
        let err = StatsError::InvalidEdge {
            line: 7,
            reason: "missing target".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid edge on line 7: missing target");
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: StatsError = io.into();
        assert!(matches!(err, StatsError::Io(_)));
    }
}
