//! Driving port for catalog reads.
//!
//! Inbound adapters use this port to fetch books without importing outbound
//! persistence concerns. Absence is a value here (`None` or an empty list),
//! never an error.

use async_trait::async_trait;

use crate::domain::{Book, BookId, Error};

/// Domain use-case port for reading the catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogQuery: Send + Sync {
    /// Return the book with `id`, or `None` when no such book exists.
    async fn get_by_id(&self, id: &BookId) -> Result<Option<Book>, Error>;

    /// Return every book in the catalog.
    async fn get_all(&self) -> Result<Vec<Book>, Error>;

    /// Return books whose `criteria` field contains `search`, ignoring case.
    ///
    /// An unknown `criteria` name yields an empty list.
    async fn get_by_criteria(&self, criteria: &str, search: &str) -> Result<Vec<Book>, Error>;
}
