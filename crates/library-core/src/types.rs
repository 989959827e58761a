//! # Entity Types
//!
//! The two persisted entities.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Entity Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐             ┌─────────────────┐                   │
//! │  │     Author      │             │      Book       │                   │
//! │  │  ─────────────  │             │  ─────────────  │                   │
//! │  │  id (i64?)      │             │  id (i64?)      │                   │
//! │  │  first_name     │             │  title          │                   │
//! │  │  last_name      │             │  isbn (lookup)  │                   │
//! │  └─────────────────┘             └─────────────────┘                   │
//! │                                                                         │
//! │  table: author                   table: book                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! `id` is assigned by the database on insert. A value built with `new` has
//! `id == None` until `save_new` returns the persisted copy.

use serde::{Deserialize, Serialize};

// =============================================================================
// Author
// =============================================================================

/// An author record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Database-assigned identifier. `None` until saved.
    pub id: Option<i64>,

    pub first_name: String,

    pub last_name: String,
}

impl Author {
    /// Creates an unsaved author.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Author {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Returns a copy carrying the given id.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Whether the database has assigned an id.
    #[inline]
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// "First Last", for display.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// =============================================================================
// Book
// =============================================================================

/// A book record.
///
/// `isbn` is a lookup key. It is expected to be unique but the schema does
/// not enforce it; duplicate ISBNs surface as ambiguous lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Database-assigned identifier. `None` until saved.
    pub id: Option<i64>,

    pub title: String,

    pub isbn: String,
}

impl Book {
    /// Creates an unsaved book.
    pub fn new(title: impl Into<String>, isbn: impl Into<String>) -> Self {
        Book {
            id: None,
            title: title.into(),
            isbn: isbn.into(),
        }
    }

    /// Returns a copy carrying the given id.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Whether the database has assigned an id.
    #[inline]
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
