//! # Validation Module
//!
//! Field rules checked by the repositories before a write is attempted.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: THIS MODULE (before any connection is acquired)              │
//! │  ├── Overlong text fields                                              │
//! │  └── Identity state (id present on update, absent on save)             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Database (SQLite)                                            │
//! │  └── NOT NULL constraints                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field contents are otherwise free-form: an empty first name or an ISBN
//! like `"1234"` is stored as given.
//!
//! ## Usage
//! ```rust
//! use library_core::validation::{validate_isbn, validate_name};
//!
//! validate_name("last_name", "Doe").unwrap();
//! validate_isbn("1234").unwrap();
//! ```

use crate::error::ValidationError;
use crate::types::{Author, Book};
use crate::MAX_TEXT_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Checks a text column against [`MAX_TEXT_LEN`] (counted in characters).
fn validate_length(field: &str, value: &str) -> ValidationResult<()> {
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_TEXT_LEN,
        });
    }

    Ok(())
}

/// Validates an author's first or last name.
///
/// ## Example
/// ```rust
/// use library_core::validation::validate_name;
///
/// assert!(validate_name("first_name", "John").is_ok());
/// assert!(validate_name("first_name", "").is_ok());
/// assert!(validate_name("first_name", &"a".repeat(256)).is_err());
/// ```
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    validate_length(field, name)
}

/// Validates a book title.
pub fn validate_title(title: &str) -> ValidationResult<()> {
    validate_length("title", title)
}

/// Validates an ISBN.
///
/// The value is an opaque lookup key; only its length is checked.
pub fn validate_isbn(isbn: &str) -> ValidationResult<()> {
    validate_length("isbn", isbn)
}

// =============================================================================
// Entity Validators
// =============================================================================

fn validate_author_fields(author: &Author) -> ValidationResult<()> {
    validate_name("first_name", &author.first_name)?;
    validate_name("last_name", &author.last_name)
}

fn validate_book_fields(book: &Book) -> ValidationResult<()> {
    validate_title(&book.title)?;
    validate_isbn(&book.isbn)
}

/// Validates an author about to be inserted. Returns an error if it already
/// has an id.
pub fn validate_new_author(author: &Author) -> ValidationResult<()> {
    if let Some(id) = author.id {
        return Err(ValidationError::IdAlreadyAssigned {
            entity: "Author".to_string(),
            id,
        });
    }
    validate_author_fields(author)
}

/// Validates an author about to be updated and returns its id.
pub fn validate_author_update(author: &Author) -> ValidationResult<i64> {
    let id = author.id.ok_or_else(|| ValidationError::MissingId {
        entity: "Author".to_string(),
    })?;
    validate_author_fields(author)?;
    Ok(id)
}

/// Validates a book about to be inserted. Returns an error if it already has
/// an id.
pub fn validate_new_book(book: &Book) -> ValidationResult<()> {
    if let Some(id) = book.id {
        return Err(ValidationError::IdAlreadyAssigned {
            entity: "Book".to_string(),
            id,
        });
    }
    validate_book_fields(book)
}

/// Validates a book about to be updated and returns its id.
pub fn validate_book_update(book: &Book) -> ValidationResult<i64> {
    let id = book.id.ok_or_else(|| ValidationError::MissingId {
        entity: "Book".to_string(),
    })?;
    validate_book_fields(book)?;
    Ok(id)
}

// =============================================================================
// Unit Tests
// =============================================================================
