//! # Book Repository
//!
//! Database operations for books.
//!
//! ISBN is treated as a lookup key rather than a constraint: the table
//! accepts duplicates, and `find_by_isbn` reports them as
//! [`DbError::AmbiguousResult`] instead of picking one.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::{expect_single, SINGLE_RESULT_LIMIT};
use crate::unit_of_work::UnitOfWork;
use library_core::validation::{validate_book_update, validate_new_book};
use library_core::Book;

const ENTITY: &str = "Book";

/// Repository for book database operations.
#[derive(Debug, Clone)]
pub struct BookRepository {
    pool: SqlitePool,
}

impl BookRepository {
    /// Creates a new BookRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BookRepository { pool }
    }

    /// Returns every book, ordered by id.
    pub async fn find_all(&self) -> DbResult<Vec<Book>> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;

        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, isbn
            FROM book
            ORDER BY id
            "#,
        )
        .fetch_all(uow.conn())
        .await?;

        uow.commit().await?;

        debug!(count = books.len(), "Loaded all books");
        Ok(books)
    }

    /// Finds the single book with this ISBN (exact, as stored).
    pub async fn find_by_isbn(&self, isbn: &str) -> DbResult<Book> {
        debug!(isbn = %isbn, "Finding book by ISBN");
        self.find_single("isbn", isbn).await
    }

    /// Finds the single book with exactly this title.
    pub async fn find_by_title(&self, title: &str) -> DbResult<Book> {
        debug!(title = %title, "Finding book by title");
        self.find_single("title", title).await
    }

    /// Single-result lookup on one column.
    ///
    /// `column` is always one of the two literals above, never caller input.
    async fn find_single(&self, column: &'static str, value: &str) -> DbResult<Book> {
        let sql = format!(
            "SELECT id, title, isbn FROM book WHERE {column} = ?1 ORDER BY id LIMIT ?2"
        );

        let mut uow = UnitOfWork::begin(&self.pool).await?;

        let rows = sqlx::query_as::<_, Book>(&sql)
            .bind(value)
            .bind(SINGLE_RESULT_LIMIT)
            .fetch_all(uow.conn())
            .await?;

        uow.commit().await?;

        expect_single(rows, ENTITY, column, value)
    }

    /// Gets a book by id.
    ///
    /// ## Returns
    /// * `Ok(Book)` - Book found
    /// * `Err(DbError::NotFound)` - No book with that id
    pub async fn get_by_id(&self, id: i64) -> DbResult<Book> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;

        let book = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, isbn
            FROM book
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(uow.conn())
        .await?;

        uow.commit().await?;

        book.ok_or_else(|| DbError::not_found(ENTITY, id))
    }

    /// Inserts a new book and returns it with its assigned id.
    ///
    /// ## Returns
    /// * `Ok(Book)` - Persisted book
    /// * `Err(DbError::Validation)` - Overlong title/ISBN, or id already set
    /// * `Err(DbError::WriteFailed)` - Database rejected the insert
    pub async fn save_new(&self, book: &Book) -> DbResult<Book> {
        validate_new_book(book)?;

        debug!(title = %book.title, isbn = %book.isbn, "Inserting book");

        let id = self
            .insert(book)
            .await
            .map_err(|e| DbError::write_failed(ENTITY, "insert", e))?;

        Ok(book.clone().with_id(id))
    }

    async fn insert(&self, book: &Book) -> DbResult<i64> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;

        let result = sqlx::query(
            r#"
            INSERT INTO book (title, isbn)
            VALUES (?1, ?2)
            "#,
        )
        .bind(&book.title)
        .bind(&book.isbn)
        .execute(uow.conn())
        .await?;

        uow.commit().await?;
        Ok(result.last_insert_rowid())
    }

    /// Updates an existing book and returns the state re-read after commit.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - No book with that id
    /// * `Err(DbError::WriteFailed)` - Database rejected the update
    pub async fn update(&self, book: &Book) -> DbResult<Book> {
        let id = validate_book_update(book)?;

        debug!(id = %id, "Updating book");

        let updated = self
            .apply_update(id, book)
            .await
            .map_err(|e| DbError::write_failed(ENTITY, "update", e))?;

        if !updated {
            return Err(DbError::not_found(ENTITY, id));
        }

        self.get_by_id(id).await
    }

    async fn apply_update(&self, id: i64, book: &Book) -> DbResult<bool> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;

        let result = sqlx::query(
            r#"
            UPDATE book SET
                title = ?2,
                isbn = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&book.title)
        .bind(&book.isbn)
        .execute(uow.conn())
        .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        uow.commit().await?;
        Ok(true)
    }

    /// Deletes a book by id, failing with `NotFound` if it doesn't exist.
    pub async fn delete_by_id(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting book");

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

        let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM book WHERE id = ?1")
            .bind(id)
            .fetch_optional(uow.conn())
            .await?;

        if existing.is_none() {
            return Ok(false);
        }

        sqlx::query("DELETE FROM book WHERE id = ?1")
            .bind(id)
            .execute(uow.conn())
            .await?;

        uow.commit().await?;
        Ok(true)
    }

    /// Counts persisted books (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book")
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

    async fn repo() -> BookRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().books()
    }

    #[tokio::test]
    async fn test_save_and_get() {
        let repo = repo().await;

        let saved = repo
            .save_new(&Book::new("Domain-Driven Design", "0321125215"))
            .await
            .unwrap();
        let id = saved.id.unwrap();

        let fetched = repo.get_by_id(id).await.unwrap();
        assert_eq!(fetched.title, "Domain-Driven Design");
        assert_eq!(fetched.isbn, "0321125215");
    }

    #[tokio::test]
    async fn test_save_new_keeps_free_form_isbn() {
        let repo = repo().await;

        let saved = repo
            .save_new(&Book::new("Spring in Action", "1234"))
            .await
            .unwrap();

        assert_eq!(repo.get_by_id(saved.id.unwrap()).await.unwrap().isbn, "1234");
        assert_eq!(repo.find_by_isbn("1234").await.unwrap(), saved);
    }

    #[tokio::test]
    async fn test_find_by_isbn() {
        let repo = repo().await;
        let ddd = repo
            .save_new(&Book::new("Domain-Driven Design", "0321125215"))
            .await
            .unwrap();
        repo.save_new(&Book::new("Clean Code", "9780132350884"))
            .await
            .unwrap();

        assert_eq!(repo.find_by_isbn("0321125215").await.unwrap(), ddd);

        let err = repo.find_by_isbn("9999999999").await.unwrap_err();
        assert_eq!(err.to_string(), "Book not found: 9999999999");
    }

    #[tokio::test]
    async fn test_find_by_isbn_ambiguous() {
        let repo = repo().await;
        repo.save_new(&Book::new("Dune", "9780441013593")).await.unwrap();
        repo.save_new(&Book::new("Dune (reprint)", "9780441013593"))
            .await
            .unwrap();

        let err = repo.find_by_isbn("9780441013593").await.unwrap_err();
        assert!(err.is_ambiguous());
        assert_eq!(err.to_string(), "Book lookup by isbn matched more than one row");
    }

    #[tokio::test]
    async fn test_find_by_title() {
        let repo = repo().await;
        let book = repo
            .save_new(&Book::new("Spring in Action", "9781617294945"))
            .await
            .unwrap();

        assert_eq!(repo.find_by_title("Spring in Action").await.unwrap(), book);
        assert!(repo.find_by_title("Spring").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_find_by_title_ambiguous() {
        let repo = repo().await;
        repo.save_new(&Book::new("Dune", "9780441013593")).await.unwrap();
        repo.save_new(&Book::new("Dune", "0441172717")).await.unwrap();

        let err = repo.find_by_title("Dune").await.unwrap_err();
        assert!(err.is_ambiguous());
    }

    #[tokio::test]
    async fn test_update_and_reread() {
        let repo = repo().await;
        let mut book = repo
            .save_new(&Book::new("Clean Code", "9780132350884"))
            .await
            .unwrap();

        book.title = "Clean Code, 2nd Edition".to_string();
        let updated = repo.update(&book).await.unwrap();
        assert_eq!(updated.title, "Clean Code, 2nd Edition");
        assert!(repo
            .find_by_title("Clean Code")
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn test_update_missing_book() {
        let repo = repo().await;

        let err = repo
            .update(&Book::new("Clean Code", "9780132350884").with_id(5))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let repo = repo().await;
        let keep = repo.save_new(&Book::new("Dune", "9780441013593")).await.unwrap();
        let gone = repo
            .save_new(&Book::new("Clean Code", "9780132350884"))
            .await
            .unwrap();

        repo.delete_by_id(gone.id.unwrap()).await.unwrap();

        assert_eq!(repo.find_all().await.unwrap(), vec![keep]);
        assert!(repo
            .delete_by_id(gone.id.unwrap())
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn test_rejected_writes_are_write_failures() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.books();
        let mut book = repo.save_new(&Book::new("Dune", "9780441013593")).await.unwrap();
        let original = book.clone();

        reject_writes(db.pool(), "book").await;

        let err = repo
            .save_new(&Book::new("Clean Code", "9780132350884"))
            .await
            .unwrap_err();
        assert!(err.is_write_failure(), "got {err:?}");

        book.title = "Dune Messiah".to_string();
        let err = repo.update(&book).await.unwrap_err();
        assert!(err.is_write_failure(), "got {err:?}");

        let err = repo.delete_by_id(original.id.unwrap()).await.unwrap_err();
        assert!(err.is_write_failure(), "got {err:?}");

        assert_eq!(repo.find_all().await.unwrap(), vec![original]);
    }
}
