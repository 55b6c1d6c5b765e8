//! Book repository over a schemaless document store.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::ports::{BookRepository, BookRepositoryError};
use crate::domain::{Book, BookField, BookId};

use super::{Document, DocumentStore, DocumentStoreError, FieldMatch};

/// [`BookRepository`] adapter mapping books to JSON documents.
///
/// Books are stored as their camelCase JSON form; the `id` key carries the
/// identifier and absent optional fields are omitted.
pub struct DocumentBookRepository<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> DocumentBookRepository<S> {
    /// Create a repository over the given store client.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

fn map_store_error(error: DocumentStoreError) -> BookRepositoryError {
    match error {
        DocumentStoreError::Connection { message } => BookRepositoryError::connection(message),
        DocumentStoreError::Query { message } => BookRepositoryError::query(message),
    }
}

fn to_document(book: &Book) -> Result<Document, BookRepositoryError> {
    match serde_json::to_value(book) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(other) => Err(BookRepositoryError::query(format!(
            "book serialised to non-object JSON: {other}"
        ))),
        Err(error) => Err(BookRepositoryError::query(format!(
            "failed to serialise book: {error}"
        ))),
    }
}

fn from_document(document: Document) -> Result<Book, BookRepositoryError> {
    serde_json::from_value(Value::Object(document))
        .map_err(|error| BookRepositoryError::query(format!("stored document is not a book: {error}")))
}

fn from_documents(documents: Vec<Document>) -> Result<Vec<Book>, BookRepositoryError> {
    documents.into_iter().map(from_document).collect()
}

#[async_trait]
impl<S> BookRepository for DocumentBookRepository<S>
where
    S: DocumentStore + ?Sized,
{
    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, BookRepositoryError> {
        self.store
            .find_by_id(id.as_ref())
            .await
            .map_err(map_store_error)?
            .map(from_document)
            .transpose()
    }

    async fn find_all(&self) -> Result<Vec<Book>, BookRepositoryError> {
        let documents = self.store.find_all().await.map_err(map_store_error)?;
        from_documents(documents)
    }

    async fn save(&self, book: &Book) -> Result<Book, BookRepositoryError> {
        let document = to_document(book)?;
        let stored = self.store.save(document).await.map_err(map_store_error)?;
        from_document(stored)
    }

    async fn delete_by_id(&self, id: &BookId) -> Result<(), BookRepositoryError> {
        self.store
            .delete_by_id(id.as_ref())
            .await
            .map_err(map_store_error)
    }

    async fn find_by_field_containing(
        &self,
        field: BookField,
        term: &str,
    ) -> Result<Vec<Book>, BookRepositoryError> {
        let criteria = FieldMatch::contains_ignore_case(field.as_str(), term);
        let documents = self.store.query(&criteria).await.map_err(map_store_error)?;
        from_documents(documents)
    }
}
