//! Catalog domain service.
//!
//! Implements the [`CatalogQuery`] and [`CatalogCommand`] driving ports on top
//! of a [`BookRepository`]. This is the only component that branches: it
//! resolves criteria names to typed fields and guards updates and deletes
//! with an existence check.
//!
//! The existence check and the following write are two separate repository
//! calls. Concurrent writers to the same id race (last write wins), and a
//! delete landing between an update's check and its write lets the update
//! recreate the record.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{BookRepository, BookRepositoryError, CatalogCommand, CatalogQuery};
use crate::domain::{Book, BookField, BookId, Error, TraceId};

/// Client-facing message for store connection failures; driver detail is
/// only logged.
const STORE_UNAVAILABLE_MESSAGE: &str = "book store unavailable";

/// Catalog service implementing the driving ports.
pub struct CatalogService<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: ?Sized> Clone for CatalogService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ?Sized> CatalogService<R> {
    /// Create a new service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> CatalogService<R>
where
    R: BookRepository + ?Sized,
{
    fn map_repository_error(error: BookRepositoryError) -> Error {
        let trace_id = TraceId::current().map(|id| id.to_string());
        warn!(%error, trace_id = trace_id.as_deref().unwrap_or("-"), "book store call failed");
        match error {
            BookRepositoryError::Connection { .. } => {
                Error::service_unavailable(STORE_UNAVAILABLE_MESSAGE)
            }
            BookRepositoryError::Query { message } => {
                Error::internal(format!("book store error: {message}"))
            }
        }
    }

    async fn exists(&self, id: &BookId) -> Result<bool, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map(|found| found.is_some())
            .map_err(Self::map_repository_error)
    }
}

#[async_trait]
impl<R> CatalogQuery for CatalogService<R>
where
    R: BookRepository + ?Sized,
{
    async fn get_by_id(&self, id: &BookId) -> Result<Option<Book>, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)
    }

    async fn get_all(&self) -> Result<Vec<Book>, Error> {
        self.repository
            .find_all()
            .await
            .map_err(Self::map_repository_error)
    }

    async fn get_by_criteria(&self, criteria: &str, search: &str) -> Result<Vec<Book>, Error> {
        let field = match criteria.parse::<BookField>() {
            Ok(field) => field,
            Err(unknown) => {
                debug!(criteria = %unknown.name, "criteria names no book field; returning no matches");
                return Ok(Vec::new());
            }
        };

        self.repository
            .find_by_field_containing(field, search)
            .await
            .map_err(Self::map_repository_error)
    }
}

#[async_trait]
impl<R> CatalogCommand for CatalogService<R>
where
    R: BookRepository + ?Sized,
{
    async fn create(&self, book: Book) -> Result<Book, Error> {
        let stored = self
            .repository
            .save(&book)
            .await
            .map_err(Self::map_repository_error)?;
        debug!(book_id = ?stored.id, "book created");
        Ok(stored)
    }

    async fn update(&self, book: Book) -> Result<bool, Error> {
        let Some(id) = book.id.as_ref() else {
            debug!("update without id; nothing to replace");
            return Ok(false);
        };
        if !self.exists(id).await? {
            debug!(book_id = %id, "update target not found");
            return Ok(false);
        }

        self.repository
            .save(&book)
            .await
            .map_err(Self::map_repository_error)?;
        debug!(book_id = %id, "book replaced");
        Ok(true)
    }

    async fn delete(&self, id: &BookId) -> Result<bool, Error> {
        if !self.exists(id).await? {
            debug!(book_id = %id, "delete target not found");
            return Ok(false);
        }

        self.repository
            .delete_by_id(id)
            .await
            .map_err(Self::map_repository_error)?;
        debug!(book_id = %id, "book deleted");
        Ok(true)
    }
}

#[cfg(test)]
#[path = "catalog_service_tests.rs"]
mod tests;
