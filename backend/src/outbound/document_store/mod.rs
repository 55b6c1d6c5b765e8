//! Schemaless document store client and the book repository built on it.
//!
//! [`DocumentStore`] is the narrow client surface the catalog needs from a
//! document database: keyed CRUD over one collection plus a single-field
//! containment query. Documents are JSON objects whose `id` key holds the
//! store-assigned identifier.
//!
//! Adapters:
//! - [`InMemoryDocumentStore`] for tests and local development.
//! - [`crate::outbound::persistence::DieselDocumentStore`] for PostgreSQL.

mod book_repository;
mod memory;

pub use book_repository::DocumentBookRepository;
pub use memory::InMemoryDocumentStore;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domain::ports::define_port_error;

/// Key holding a document's identifier.
pub const ID_KEY: &str = "id";

/// A stored JSON object.
pub type Document = Map<String, Value>;

define_port_error! {
    /// Errors raised by document store clients.
    pub enum DocumentStoreError {
        /// The store could not be reached.
        Connection { message: String } => "document store connection failed: {message}",
        /// The store rejected or failed to execute an operation.
        Query { message: String } => "document store query failed: {message}",
    }
}

/// Return the document's identifier when it holds a non-blank string.
pub fn document_id(document: &Document) -> Option<&str> {
    document
        .get(ID_KEY)
        .and_then(Value::as_str)
        .filter(|id| !id.trim().is_empty())
}

/// Case-insensitive containment match against one document field.
///
/// The needle is literal text: characters that are special in regular
/// expressions or SQL `LIKE` patterns match only themselves.
///
/// # Examples
/// ```
/// use book_catalog::outbound::document_store::{Document, FieldMatch};
/// use serde_json::json;
///
/// let criteria = FieldMatch::contains_ignore_case("title", "DUNE");
/// let document: Document = json!({"title": "Children of Dune"})
///     .as_object()
///     .cloned()
///     .unwrap_or_default();
/// assert!(criteria.matches(&document));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    field: String,
    needle: String,
}

impl FieldMatch {
    /// Match documents whose `field` contains `needle`, ignoring case.
    pub fn contains_ignore_case(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            needle: needle.into(),
        }
    }

    /// Document key being matched.
    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    /// Literal text the field must contain.
    pub fn needle(&self) -> &str {
        self.needle.as_str()
    }

    /// Evaluate the match against a document.
    ///
    /// Strings, numbers and booleans are compared through their text form;
    /// missing, null and structured values never match.
    pub fn matches(&self, document: &Document) -> bool {
        let text = match document.get(&self.field) {
            Some(Value::String(text)) => text.clone(),
            Some(Value::Number(number)) => number.to_string(),
            Some(Value::Bool(flag)) => flag.to_string(),
            _ => return false,
        };
        text.to_lowercase().contains(&self.needle.to_lowercase())
    }
}

/// Client surface for a single schemaless collection.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert or replace a document keyed by its `id`, assigning one when the
    /// document has none. Returns the document as stored.
    async fn save(&self, document: Document) -> Result<Document, DocumentStoreError>;

    /// Fetch the document with `id`.
    async fn find_by_id(&self, id: &str) -> Result<Option<Document>, DocumentStoreError>;

    /// Return every document in insertion order.
    async fn find_all(&self) -> Result<Vec<Document>, DocumentStoreError>;

    /// Remove the document with `id`; absent ids are ignored.
    async fn delete_by_id(&self, id: &str) -> Result<(), DocumentStoreError>;

    /// Return documents satisfying `criteria`, in insertion order.
    async fn query(&self, criteria: &FieldMatch) -> Result<Vec<Document>, DocumentStoreError>;
}
