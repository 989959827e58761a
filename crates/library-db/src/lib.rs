//! # library-db: Database Layer for Authors and Books
//!
//! Repositories for the `author` and `book` tables, backed by SQLite through
//! sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Library DAO Data Flow                            │
//! │                                                                         │
//! │  Caller (db.authors().find_by_name("John", "Doe"))                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   library-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  author.rs    │    │  (embedded)  │  │   │
//! │  │   │               │    │  book.rs      │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│               │    │ 0001_author  │  │   │
//! │  │   │ UnitOfWork    │    │               │    │ 0002_book    │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`unit_of_work`] - One transaction on one pooled connection
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Author and Book repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use library_core::Author;
//! use library_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/library.db")).await?;
//!
//! let saved = db.authors().save_new(&Author::new("John", "Doe")).await?;
//! let found = db.authors().find_by_name("John", "Doe").await?;
//! assert_eq!(saved, found);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod unit_of_work;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ConfigError, DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use unit_of_work::UnitOfWork;

pub use repository::author::AuthorRepository;
pub use repository::book::BookRepository;
