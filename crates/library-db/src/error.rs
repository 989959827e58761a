//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)        ValidationError (library-core)      │
//! │       │                                   │                             │
//! │       ▼                                   ▼                             │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ├── read path:  NotFound / AmbiguousResult / QueryFailed ...     │
//! │       └── write path: WriteFailed { source: <classified cause> }       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller (no retry, no logging in this crate)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use library_core::ValidationError;
use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    ///
    /// ## When This Occurs
    /// - ID doesn't exist (get, update, delete)
    /// - A single-result query matched zero rows
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A query documented to return one row matched several.
    ///
    /// ## When This Occurs
    /// - Two books share a title or ISBN
    /// - Two authors share first and last name
    #[error("{entity} lookup by {criteria} matched more than one row")]
    AmbiguousResult { entity: String, criteria: String },

    /// The database rejected an insert, update or delete.
    ///
    /// `source` holds the classified cause (unique violation, pool timeout, ...).
    #[error("Failed to {operation} {entity}: {source}")]
    WriteFailed {
        entity: String,
        operation: String,
        #[source]
        source: Box<DbError>,
    },

    /// The entity was rejected before reaching the database.
    #[error("Invalid entity: {0}")]
    Validation(#[from] ValidationError),

    /// Unique constraint violation.
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Foreign key constraint violation.
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Transaction could not be started or committed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Creates an AmbiguousResult error.
    pub fn ambiguous(entity: impl Into<String>, criteria: impl Into<String>) -> Self {
        DbError::AmbiguousResult {
            entity: entity.into(),
            criteria: criteria.into(),
        }
    }

    /// Wraps a storage error raised while writing.
    pub fn write_failed(
        entity: impl Into<String>,
        operation: impl Into<String>,
        cause: impl Into<DbError>,
    ) -> Self {
        DbError::WriteFailed {
            entity: entity.into(),
            operation: operation.into(),
            source: Box::new(cause.into()),
        }
    }

    /// True for [`DbError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::NotFound { .. })
    }

    /// True for [`DbError::AmbiguousResult`].
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, DbError::AmbiguousResult { .. })
    }

    /// True when the store rejected a write.
    pub fn is_write_failure(&self) -> bool {
        matches!(self, DbError::WriteFailed { .. })
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → Analyze message for constraint type
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // UNIQUE constraint: "UNIQUE constraint failed: <table>.<column>"
                // FK constraint: "FOREIGN KEY constraint failed"
                if msg.contains("UNIQUE constraint failed") {
                    let field = msg
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    DbError::UniqueViolation {
                        field,
                        value: "unknown".to_string(),
                    }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Configuration Error
// =============================================================================

/// Errors raised while reading [`DbConfig`](crate::DbConfig) from the
/// environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

// =============================================================================
// Unit Tests
// =============================================================================
