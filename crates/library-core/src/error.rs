//! # Error Types
//!
//! Validation error types for library-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  library-core errors (this file)                                       │
//! │  └── ValidationError  - Entity rejected before reaching the database   │
//! │                                                                         │
//! │  library-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Flow: ValidationError → DbError::Validation → Caller                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any unit of work is opened, so a rejected entity never
/// costs a connection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Field value is too long for its column.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// `save_new` was handed an entity that already carries an id.
    #[error("{entity} already has id {id}; use update instead")]
    IdAlreadyAssigned { entity: String, id: i64 },

    /// `update` was handed an entity that was never persisted.
    #[error("{entity} has no id; save it before updating")]
    MissingId { entity: String },
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::TooLong {
            field: "title".to_string(),
            max: 255,
        };
        assert_eq!(err.to_string(), "title must be at most 255 characters");
    }

    #[test]
    fn test_identity_error_messages() {
        let err = ValidationError::IdAlreadyAssigned {
            entity: "Author".to_string(),
            id: 7,
        };
        assert_eq!(err.to_string(), "Author already has id 7; use update instead");

        let err = ValidationError::MissingId {
            entity: "Book".to_string(),
        };
        assert_eq!(err.to_string(), "Book has no id; save it before updating");
    }
}
