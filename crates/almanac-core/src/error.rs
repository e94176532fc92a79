//! Error types for the almanac library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all scheduler operations.
#[derive(Error, Debug)]
pub enum AlmanacError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Plant not found for the given ID (or owned by someone else)
    #[error("Plant with ID {id} not found")]
    PlantNotFound { id: u64 },
    /// Task not found for the given ID (or owned by someone else)
    #[error("Task with ID {id} not found")]
    TaskNotFound { id: u64 },
    /// Journal entry not found for the given ID
    #[error("Journal entry with ID {id} not found")]
    EntryNotFound { id: u64 },
    /// Plant configuration rejected before any write happened.
    ///
    /// The messages are base-level: they are not tied one-to-one to a field,
    /// so callers render them as a flat list.
    #[error("Plant configuration is invalid: {}", errors.join("; "))]
    ConfigurationInvalid { errors: Vec<String> },
    /// A date string could not be parsed as a calendar date
    #[error("Invalid date '{input}': {source}")]
    DateParse {
        input: String,
        #[source]
        source: jiff::Error,
    },
    /// Task regeneration for a single plant failed and was rolled back
    #[error("Failed to generate tasks for plant {plant_id}: {source}")]
    Generation {
        plant_id: u64,
        #[source]
        source: Box<AlmanacError>,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> AlmanacError {
        AlmanacError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> AlmanacError {
        AlmanacError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl AlmanacError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Wraps a persistence failure that aborted one plant's regeneration.
    pub fn generation(plant_id: u64, source: AlmanacError) -> Self {
        Self::Generation {
            plant_id,
            source: Box::new(source),
        }
    }

    /// Returns true for errors caused by caller input rather than storage.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigurationInvalid { .. } | Self::DateParse { .. } | Self::InvalidInput { .. }
        )
    }

    /// Returns true when the error reports a missing record.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::PlantNotFound { .. } | Self::TaskNotFound { .. } | Self::EntryNotFound { .. }
        )
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| AlmanacError::database(message).with_source(e))
    }
}

/// Result type alias for almanac operations
pub type Result<T> = std::result::Result<T, AlmanacError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_invalid_joins_messages() {
        let err = AlmanacError::ConfigurationInvalid {
            errors: vec!["first".to_string(), "second".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Plant configuration is invalid: first; second"
        );
        assert!(err.is_user_error());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_generation_wraps_source() {
        let inner = AlmanacError::database("Failed to insert task")
            .with_source(rusqlite::Error::QueryReturnedNoRows);
        let err = AlmanacError::generation(7, inner);
        let message = err.to_string();
        assert!(message.contains("plant 7"));
        assert!(message.contains("Failed to insert task"));
        assert!(!err.is_user_error());
    }

    #[test]
    fn test_not_found_classification() {
        assert!(AlmanacError::TaskNotFound { id: 1 }.is_not_found());
        assert!(AlmanacError::PlantNotFound { id: 1 }.is_not_found());
        assert!(AlmanacError::EntryNotFound { id: 1 }.is_not_found());
        assert!(
            !AlmanacError::invalid_input("name")
                .with_reason("blank")
                .is_not_found()
        );
    }
}
