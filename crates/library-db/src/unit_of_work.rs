//! # Unit of Work
//!
//! A short-lived handle for exactly one transaction on one pooled connection.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Unit of Work Lifecycle                             │
//! │                                                                         │
//! │  UnitOfWork::begin(&pool)   ← acquire connection + BEGIN               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  queries via uow.conn()                                                │
//! │       │                                                                 │
//! │       ├── uow.commit()  → COMMIT, connection back to pool              │
//! │       │                                                                 │
//! │       └── dropped (early return, `?`, panic)                           │
//! │                         → ROLLBACK, connection back to pool            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `commit` and `rollback` take `self`, so a unit of work can never be used
//! for a second transaction.

use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use tracing::trace;

use crate::error::{DbError, DbResult};

/// One transaction on one pooled connection.
pub struct UnitOfWork {
    tx: Transaction<'static, Sqlite>,
}

impl UnitOfWork {
    /// Acquires a connection from the pool and begins a transaction.
    ///
    /// ## Errors
    /// * `DbError::PoolExhausted` - no connection within the acquire timeout
    /// * `DbError::ConnectionFailed` - the pool has been closed
    pub async fn begin(pool: &SqlitePool) -> DbResult<Self> {
        let tx = pool.begin().await?;
        trace!("Unit of work opened");
        Ok(UnitOfWork { tx })
    }

    /// The connection queries should run on.
    pub fn conn(&mut self) -> &mut SqliteConnection {
        &mut self.tx
    }

    /// Commits the transaction and releases the connection.
    pub async fn commit(self) -> DbResult<()> {
        self.tx
            .commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
        trace!("Unit of work committed");
        Ok(())
    }

    /// Rolls the transaction back and releases the connection.
    ///
    /// Dropping the unit of work has the same effect; this form surfaces
    /// rollback errors.
    pub async fn rollback(self) -> DbResult<()> {
        self.tx
            .rollback()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
        trace!("Unit of work rolled back");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
