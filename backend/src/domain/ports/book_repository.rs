//! Driven port for book persistence.
//!
//! The repository is identity-keyed CRUD plus one field-containment search.
//! Adapters translate between [`Book`] and whatever the backing store holds;
//! no existence checks or business rules live behind this port.

use async_trait::async_trait;

use crate::domain::{Book, BookField, BookId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by book repository adapters.
    pub enum BookRepositoryError {
        /// The backing store could not be reached.
        Connection { message: String } => "book repository connection failed: {message}",
        /// A read or write failed during execution or document conversion.
        Query { message: String } => "book repository query failed: {message}",
    }
}

/// Port for reading and writing catalog entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Fetch a book by identifier.
    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, BookRepositoryError>;

    /// Return every stored book in store order.
    async fn find_all(&self) -> Result<Vec<Book>, BookRepositoryError>;

    /// Insert or fully replace a book, returning the stored record.
    ///
    /// The store assigns an identifier when `book.id` is `None`.
    async fn save(&self, book: &Book) -> Result<Book, BookRepositoryError>;

    /// Remove the book with `id`. Removing an absent id is not an error.
    async fn delete_by_id(&self, id: &BookId) -> Result<(), BookRepositoryError>;

    /// Return books whose `field` contains `term`, ignoring case.
    ///
    /// `term` is matched literally. Books without the field never match.
    async fn find_by_field_containing(
        &self,
        field: BookField,
        term: &str,
    ) -> Result<Vec<Book>, BookRepositoryError>;
}
