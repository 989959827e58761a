//! # library-core: Entities for the Author/Book repositories
//!
//! This crate holds the plain data types persisted by `library-db` and the
//! rules they must satisfy before they are written. It performs no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Library DAO Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Caller (out of scope)                        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 library-db (Repositories)                       │   │
//! │  │        AuthorRepository, BookRepository, UnitOfWork             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ uses                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ library-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌───────────┐                 │   │
//! │  │   │   types   │  │ validation │  │   error   │                 │   │
//! │  │   │  Author   │  │   rules    │  │ Validation│                 │   │
//! │  │   │   Book    │  │   checks   │  │   Error   │                 │   │
//! │  │   └───────────┘  └────────────┘  └───────────┘                 │   │
//! │  │                                                                 │   │
//! │  │              NO I/O • NO DATABASE • NO NETWORK                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entity types (Author, Book)
//! - [`validation`] - Field rules checked before every write
//! - [`error`] - Validation error types
//!
//! ## Example Usage
//!
//! ```rust
//! use library_core::{Author, validation::validate_new_author};
//!
//! let author = Author::new("John", "Doe");
//! assert!(!author.is_persisted());
//! assert!(validate_new_author(&author).is_ok());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of any persisted text column.
///
/// Matches the `VARCHAR(255)` width the schema was originally generated with.
pub const MAX_TEXT_LEN: usize = 255;
