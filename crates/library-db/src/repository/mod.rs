//! # Repository Module
//!
//! Database repository implementations for Author and Book.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Call = One Unit of Work                          │
//! │                                                                         │
//! │  Caller                                                                │
//! │       │  db.authors().find_by_name("John", "Doe")                      │
//! │       ▼                                                                 │
//! │  AuthorRepository                                                      │
//! │       │  UnitOfWork::begin(&pool)                                      │
//! │       │  SELECT ... LIMIT 2                                            │
//! │       │  commit / drop                                                 │
//! │       ▼                                                                 │
//! │  0 rows → NotFound   1 row → Ok(author)   2 rows → AmbiguousResult     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`AuthorRepository`](author::AuthorRepository) - Author CRUD, exact and prefix lookups
//! - [`BookRepository`](book::BookRepository) - Book CRUD, ISBN and title lookups

pub mod author;
pub mod book;

use crate::error::{DbError, DbResult};

/// Row limit for single-result queries: one more than allowed, so a
/// duplicate is detected without reading every match.
pub(crate) const SINGLE_RESULT_LIMIT: i64 = 2;

/// Reduces the rows of a single-result query to exactly one value.
///
/// `key` is the looked-up value reported in `NotFound`; `criteria` names the
/// fields reported in `AmbiguousResult`.
pub(crate) fn expect_single<T>(
    mut rows: Vec<T>,
    entity: &str,
    criteria: &str,
    key: &str,
) -> DbResult<T> {
    if rows.len() > 1 {
        return Err(DbError::ambiguous(entity, criteria));
    }
    rows.pop().ok_or_else(|| DbError::not_found(entity, key))
}

/// Installs triggers that abort every INSERT, UPDATE and DELETE on `table`,
/// so a test can observe how repositories report a rejected write.
#[cfg(test)]
pub(crate) async fn reject_writes(pool: &sqlx::SqlitePool, table: &str) {
    for event in ["insert", "update", "delete"] {
        let sql = format!(
            "CREATE TRIGGER reject_{table}_{event} BEFORE {event} ON {table} \
             BEGIN SELECT RAISE(ABORT, '{table} is read-only'); END"
        );
        sqlx::query(&sql).execute(pool).await.unwrap();
    }
}
