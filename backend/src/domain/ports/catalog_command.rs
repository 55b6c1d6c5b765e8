//! Driving port for catalog mutations.

use async_trait::async_trait;

use crate::domain::{Book, BookId, Error};

/// Domain use-case port for changing the catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogCommand: Send + Sync {
    /// Store a new book and return it with its assigned identifier.
    async fn create(&self, book: Book) -> Result<Book, Error>;

    /// Replace the stored book sharing `book.id`.
    ///
    /// Returns `false` without writing when no such book exists.
    async fn update(&self, book: Book) -> Result<bool, Error>;

    /// Remove the book with `id`.
    ///
    /// Returns `false` without writing when no such book exists.
    async fn delete(&self, id: &BookId) -> Result<bool, Error>;
}
