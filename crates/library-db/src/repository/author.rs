//! # Author Repository
//!
//! Database operations for authors.
//!
//! ## Key Operations
//! - Lookup by id, by exact first + last name, by last-name prefix
//! - Insert, update (write then re-read), delete (assert then delete)
//!
//! ## Update Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Write, Then Re-read                                  │
//! │                                                                         │
//! │  Unit of work #1                 Unit of work #2                       │
//! │  ───────────────                 ───────────────                       │
//! │  UPDATE author SET ...           SELECT ... WHERE id = ?               │
//! │  WHERE id = ?                         │                                │
//! │  COMMIT ───────────────────────────►  └─► returned to caller           │
//! │                                                                         │
//! │  The caller only ever sees what the database committed, never the      │
//! │  value it passed in.                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::{expect_single, SINGLE_RESULT_LIMIT};
use crate::unit_of_work::UnitOfWork;
use library_core::validation::{validate_author_update, validate_new_author};
use library_core::Author;

const ENTITY: &str = "Author";

/// Repository for author database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = AuthorRepository::new(pool);
///
/// let saved = repo.save_new(&Author::new("John", "Doe")).await?;
/// let smiths = repo.list_by_last_name_prefix("Sm").await?;
/// ```
#[derive(Debug, Clone)]
pub struct AuthorRepository {
    pool: SqlitePool,
}

impl AuthorRepository {
    /// Creates a new AuthorRepository.
    pub fn new(pool: SqlitePool) -> Self {
        AuthorRepository { pool }
    }

    /// Returns every author, ordered by id.
    pub async fn find_all(&self) -> DbResult<Vec<Author>> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;

        let authors = sqlx::query_as::<_, Author>(
            r#"
            SELECT id, first_name, last_name
            FROM author
            ORDER BY id
            "#,
        )
        .fetch_all(uow.conn())
        .await?;

        uow.commit().await?;

        debug!(count = authors.len(), "Loaded all authors");
        Ok(authors)
    }

    /// Lists authors whose last name starts with `prefix`.
    ///
    /// The comparison is case-sensitive and `%`/`_` have no special meaning.
    /// An empty prefix matches every author.
    pub async fn list_by_last_name_prefix(&self, prefix: &str) -> DbResult<Vec<Author>> {
        debug!(prefix = %prefix, "Listing authors by last name prefix");

        let mut uow = UnitOfWork::begin(&self.pool).await?;

        let authors = sqlx::query_as::<_, Author>(
            r#"
            SELECT id, first_name, last_name
            FROM author
            WHERE substr(last_name, 1, length(?1)) = ?1
            ORDER BY id
            "#,
        )
        .bind(prefix)
        .fetch_all(uow.conn())
        .await?;

        uow.commit().await?;

        debug!(count = authors.len(), "Prefix listing returned authors");
        Ok(authors)
    }

    /// Gets an author by id.
    ///
    /// ## Returns
    /// * `Ok(Author)` - Author found
    /// * `Err(DbError::NotFound)` - No author with that id
    pub async fn get_by_id(&self, id: i64) -> DbResult<Author> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;

        let author = sqlx::query_as::<_, Author>(
            r#"
            SELECT id, first_name, last_name
            FROM author
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(uow.conn())
        .await?;

        uow.commit().await?;

        author.ok_or_else(|| DbError::not_found(ENTITY, id))
    }

    /// Finds the single author with exactly this first and last name.
    ///
    /// ## Returns
    /// * `Ok(Author)` - Exactly one match
    /// * `Err(DbError::NotFound)` - No match
    /// * `Err(DbError::AmbiguousResult)` - More than one match
    pub async fn find_by_name(&self, first_name: &str, last_name: &str) -> DbResult<Author> {
        debug!(first_name = %first_name, last_name = %last_name, "Finding author by name");

        let mut uow = UnitOfWork::begin(&self.pool).await?;

        let rows = sqlx::query_as::<_, Author>(
            r#"
            SELECT id, first_name, last_name
            FROM author
            WHERE first_name = ?1 AND last_name = ?2
            ORDER BY id
            LIMIT ?3
            "#,
        )
        .bind(first_name)
        .bind(last_name)
        .bind(SINGLE_RESULT_LIMIT)
        .fetch_all(uow.conn())
        .await?;

        uow.commit().await?;

        expect_single(
            rows,
            ENTITY,
            "first_name and last_name",
            &format!("{first_name} {last_name}"),
        )
    }

    /// Inserts a new author and returns it with its assigned id.
    ///
    /// ## Returns
    /// * `Ok(Author)` - Persisted author
    /// * `Err(DbError::Validation)` - Overlong name, or id already set
    /// * `Err(DbError::WriteFailed)` - Database rejected the insert
    pub async fn save_new(&self, author: &Author) -> DbResult<Author> {
        validate_new_author(author)?;

        debug!(first_name = %author.first_name, last_name = %author.last_name, "Inserting author");

        let id = self
            .insert(author)
            .await
            .map_err(|e| DbError::write_failed(ENTITY, "insert", e))?;

        Ok(author.clone().with_id(id))
    }

    async fn insert(&self, author: &Author) -> DbResult<i64> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;

        let result = sqlx::query(
            r#"
            INSERT INTO author (first_name, last_name)
            VALUES (?1, ?2)
            "#,
        )
        .bind(&author.first_name)
        .bind(&author.last_name)
        .execute(uow.conn())
        .await?;

        uow.commit().await?;
        Ok(result.last_insert_rowid())
    }

    /// Updates an existing author and returns the committed state.
    ///
    /// ## Returns
    /// * `Ok(Author)` - Author as re-read after the commit
    /// * `Err(DbError::NotFound)` - No author with that id
    /// * `Err(DbError::Validation)` - Overlong name, or no id
    /// * `Err(DbError::WriteFailed)` - Database rejected the update
    pub async fn update(&self, author: &Author) -> DbResult<Author> {
        let id = validate_author_update(author)?;

        debug!(id = %id, "Updating author");

        let updated = self
            .apply_update(id, author)
            .await
            .map_err(|e| DbError::write_failed(ENTITY, "update", e))?;

        if !updated {
            return Err(DbError::not_found(ENTITY, id));
        }

        self.get_by_id(id).await
    }

    async fn apply_update(&self, id: i64, author: &Author) -> DbResult<bool> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;

        let result = sqlx::query(
            r#"
            UPDATE author SET
                first_name = ?2,
                last_name = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&author.first_name)
        .bind(&author.last_name)
        .execute(uow.conn())
        .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        uow.commit().await?;
        Ok(true)
    }

    /// Deletes an author by id.
    ///
    /// Existence is checked and the row removed inside one transaction; a
    /// missing id fails without touching the table.
    ///
    /// ## Returns
    /// * `Ok(())` - Author deleted
    /// * `Err(DbError::NotFound)` - No author with that id
    /// * `Err(DbError::WriteFailed)` - Database rejected the delete
    pub async fn delete_by_id(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting author");

        let removed = self
            .remove(id)
            .await
            .map_err(|e| DbError::write_failed(ENTITY, "delete", e))?;

        if !removed {
            return Err(DbError::not_found(ENTITY, id));
        }

        Ok(())
    }

    async fn remove(&self, id: i64) -> DbResult<bool> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;

        let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM author WHERE id = ?1")
            .bind(id)
            .fetch_optional(uow.conn())
            .await?;

        if existing.is_none() {
            return Ok(false);
        }

        sqlx::query("DELETE FROM author WHERE id = ?1")
            .bind(id)
            .execute(uow.conn())
            .await?;

        uow.commit().await?;
        Ok(true)
    }

    /// Counts persisted authors (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM author")
            .fetch_one(uow.conn())
            .await?;

        uow.commit().await?;
        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::reject_writes;
    use library_core::{ValidationError, MAX_TEXT_LEN};

    async fn repo() -> AuthorRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().authors()
    }

    #[tokio::test]
    async fn test_save_new_assigns_id() {
        let repo = repo().await;

        let saved = repo.save_new(&Author::new("John", "Doe")).await.unwrap();
        let id = saved.id.unwrap();
        assert!(id > 0);
        assert_eq!(saved.first_name, "John");

        let fetched = repo.get_by_id(id).await.unwrap();
        assert_eq!(fetched, saved);
    }

    #[tokio::test]
    async fn test_save_new_rejects_persisted_author() {
        let repo = repo().await;

        let err = repo
            .save_new(&Author::new("John", "Doe").with_id(12))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::Validation(ValidationError::IdAlreadyAssigned { id: 12, .. })
        ));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_save_new_stores_empty_first_name() {
        let repo = repo().await;

        let saved = repo.save_new(&Author::new("", "Madonna")).await.unwrap();
        let fetched = repo.get_by_id(saved.id.unwrap()).await.unwrap();
        assert_eq!(fetched.first_name, "");
        assert_eq!(fetched, saved);
    }

    #[tokio::test]
    async fn test_save_new_rejects_overlong_name() {
        let repo = repo().await;

        let err = repo
            .save_new(&Author::new("John", "x".repeat(MAX_TEXT_LEN + 1)))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(ValidationError::TooLong { .. })));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_get_by_id_missing() {
        let repo = repo().await;

        let err = repo.get_by_id(404).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Author not found: 404");
    }

    #[tokio::test]
    async fn test_find_all_in_insertion_order() {
        let repo = repo().await;
        assert!(repo.find_all().await.unwrap().is_empty());

        let a = repo.save_new(&Author::new("Craig", "Walls")).await.unwrap();
        let b = repo.save_new(&Author::new("Eric", "Evans")).await.unwrap();

        assert_eq!(repo.find_all().await.unwrap(), vec![a, b]);
    }

    #[tokio::test]
    async fn test_list_by_last_name_prefix() {
        let repo = repo().await;
        let smith = repo.save_new(&Author::new("John", "Smith")).await.unwrap();
        repo.save_new(&Author::new("Tom", "Jones")).await.unwrap();
        let smart = repo.save_new(&Author::new("Maxwell", "Smart")).await.unwrap();

        let found = repo.list_by_last_name_prefix("Sm").await.unwrap();
        assert_eq!(found, vec![smith, smart]);

        assert!(repo.list_by_last_name_prefix("Zz").await.unwrap().is_empty());
        assert_eq!(repo.list_by_last_name_prefix("").await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_prefix_is_literal_and_case_sensitive() {
        let repo = repo().await;
        repo.save_new(&Author::new("Ann", "Smith")).await.unwrap();
        repo.save_new(&Author::new("Bob", "S_ith")).await.unwrap();

        assert_eq!(repo.list_by_last_name_prefix("sm").await.unwrap().len(), 0);
        assert_eq!(repo.list_by_last_name_prefix("S%").await.unwrap().len(), 0);

        let underscored = repo.list_by_last_name_prefix("S_").await.unwrap();
        assert_eq!(underscored.len(), 1);
        assert_eq!(underscored[0].last_name, "S_ith");
    }

    #[tokio::test]
    async fn test_find_by_name() {
        let repo = repo().await;
        let john = repo.save_new(&Author::new("John", "Doe")).await.unwrap();
        repo.save_new(&Author::new("Jane", "Doe")).await.unwrap();

        assert_eq!(repo.find_by_name("John", "Doe").await.unwrap(), john);

        let err = repo.find_by_name("John", "Smith").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_find_by_name_ambiguous() {
        let repo = repo().await;
        repo.save_new(&Author::new("John", "Doe")).await.unwrap();
        repo.save_new(&Author::new("John", "Doe")).await.unwrap();

        let err = repo.find_by_name("John", "Doe").await.unwrap_err();
        assert!(err.is_ambiguous());
    }

    #[tokio::test]
    async fn test_update_returns_committed_state() {
        let repo = repo().await;
        let mut author = repo.save_new(&Author::new("John", "Doe")).await.unwrap();

        author.first_name = "Johnny".to_string();
        let updated = repo.update(&author).await.unwrap();
        assert_eq!(updated, author);

        let fetched = repo.get_by_id(author.id.unwrap()).await.unwrap();
        assert_eq!(fetched.first_name, "Johnny");
    }

    #[tokio::test]
    async fn test_update_missing_id() {
        let repo = repo().await;

        let err = repo
            .update(&Author::new("Ghost", "Writer").with_id(77))
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let err = repo.update(&Author::new("Ghost", "Writer")).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(ValidationError::MissingId { .. })));
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let repo = repo().await;
        let author = repo.save_new(&Author::new("John", "Doe")).await.unwrap();
        let id = author.id.unwrap();

        repo.delete_by_id(id).await.unwrap();

        assert!(repo.get_by_id(id).await.unwrap_err().is_not_found());
        assert!(repo.delete_by_id(id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_missing_leaves_table_untouched() {
        let repo = repo().await;
        repo.save_new(&Author::new("John", "Doe")).await.unwrap();
        let before = repo.find_all().await.unwrap();

        let err = repo.delete_by_id(9999).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(repo.find_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_rejected_writes_are_write_failures() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.authors();
        let mut author = repo.save_new(&Author::new("John", "Doe")).await.unwrap();
        let id = author.id.unwrap();

        reject_writes(db.pool(), "author").await;

        let err = repo.save_new(&Author::new("Jane", "Doe")).await.unwrap_err();
        assert!(err.is_write_failure(), "got {err:?}");

        author.first_name = "Johnny".to_string();
        let err = repo.update(&author).await.unwrap_err();
        assert!(err.is_write_failure(), "got {err:?}");

        let err = repo.delete_by_id(id).await.unwrap_err();
        assert!(err.is_write_failure(), "got {err:?}");

        let rows = repo.find_all().await.unwrap();
        assert_eq!(rows, vec![Author::new("John", "Doe").with_id(id)]);
    }

    #[tokio::test]
    async fn test_count_on_closed_pool() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.authors();
        db.close().await;

        let err = repo.count().await.unwrap_err();
        assert!(matches!(err, DbError::ConnectionFailed(_)), "got {err:?}");
    }
}
