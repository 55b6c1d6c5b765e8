//! In-process document store.
//!
//! Keeps documents in insertion order behind a mutex and assigns sequential
//! decimal identifiers (`"1"`, `"2"`, ...). Replacing a document keeps its
//! original position.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::Value;

use super::{Document, DocumentStore, DocumentStoreError, FieldMatch, ID_KEY, document_id};

#[derive(Debug, Default)]
struct Collection {
    documents: Vec<Document>,
    next_id: u64,
}

impl Collection {
    fn position(&self, id: &str) -> Option<usize> {
        self.documents
            .iter()
            .position(|document| document_id(document) == Some(id))
    }

    fn allocate_id(&mut self) -> String {
        loop {
            self.next_id += 1;
            let candidate = self.next_id.to_string();
            if self.position(&candidate).is_none() {
                return candidate;
            }
        }
    }
}

/// Document store backed by process memory.
///
/// # Examples
/// ```
/// use book_catalog::outbound::document_store::{DocumentStore, InMemoryDocumentStore};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let store = InMemoryDocumentStore::new();
/// let saved = store.save(Default::default()).await.unwrap();
/// assert_eq!(saved.get("id").and_then(|id| id.as_str()), Some("1"));
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collection: Mutex<Collection>,
}

impl InMemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Collection>, DocumentStoreError> {
        self.collection
            .lock()
            .map_err(|_| DocumentStoreError::query("in-memory collection lock poisoned"))
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn save(&self, mut document: Document) -> Result<Document, DocumentStoreError> {
        let mut collection = self.lock()?;
        let existing = document_id(&document).map(str::to_owned);
        match existing.as_deref().and_then(|id| collection.position(id)) {
            Some(index) => {
                if let Some(slot) = collection.documents.get_mut(index) {
                    *slot = document.clone();
                }
            }
            None => {
                if existing.is_none() {
                    let id = collection.allocate_id();
                    document.insert(ID_KEY.to_owned(), Value::String(id));
                }
                collection.documents.push(document.clone());
            }
        }
        Ok(document)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Document>, DocumentStoreError> {
        let collection = self.lock()?;
        Ok(collection
            .position(id)
            .and_then(|index| collection.documents.get(index).cloned()))
    }

    async fn find_all(&self) -> Result<Vec<Document>, DocumentStoreError> {
        Ok(self.lock()?.documents.clone())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), DocumentStoreError> {
        let mut collection = self.lock()?;
        collection
            .documents
            .retain(|document| document_id(document) != Some(id));
        Ok(())
    }

    async fn query(&self, criteria: &FieldMatch) -> Result<Vec<Document>, DocumentStoreError> {
        Ok(self
            .lock()?
            .documents
            .iter()
            .filter(|document| criteria.matches(document))
            .cloned()
            .collect())
    }
}
