//! PostgreSQL-backed document store.
//!
//! Documents live in a single `books` table as JSONB keyed by a text id.
//! Field searches use `document ->> field ILIKE pattern` with the needle
//! escaped, so input is always matched literally.

use async_trait::async_trait;
use diesel::QueryableByName;
use diesel::result::OptionalExtension;
use diesel::sql_query;
use diesel::sql_types::{Jsonb, Text};
use diesel_async::RunQueryDsl;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::outbound::document_store::{
    Document, DocumentStore, DocumentStoreError, FieldMatch, ID_KEY, document_id,
};

use super::diesel_helpers::{contains_pattern, map_diesel_error, map_pool_error};
use super::pool::DbPool;

const CREATE_COLLECTION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS books (
    id TEXT PRIMARY KEY,
    document JSONB NOT NULL,
    inserted_at TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

const UPSERT_SQL: &str = r#"
INSERT INTO books (id, document)
VALUES ($1, $2)
ON CONFLICT (id)
DO UPDATE SET document = EXCLUDED.document
"#;

const FIND_BY_ID_SQL: &str = "SELECT id, document FROM books WHERE id = $1";

const FIND_ALL_SQL: &str = "SELECT id, document FROM books ORDER BY inserted_at, id";

const DELETE_SQL: &str = "DELETE FROM books WHERE id = $1";

const QUERY_SQL: &str = r#"
SELECT id, document FROM books
WHERE document ->> $1 ILIKE $2 ESCAPE '\'
ORDER BY inserted_at, id
"#;

#[derive(Debug, QueryableByName)]
struct DocumentRow {
    #[diesel(sql_type = Text)]
    id: String,
    #[diesel(sql_type = Jsonb)]
    document: Value,
}

impl DocumentRow {
    fn into_document(self) -> Result<Document, DocumentStoreError> {
        let Value::Object(mut document) = self.document else {
            return Err(DocumentStoreError::query(format!(
                "row {} does not hold a JSON object",
                self.id
            )));
        };
        document.insert(ID_KEY.to_owned(), Value::String(self.id));
        Ok(document)
    }
}

fn into_documents(rows: Vec<DocumentRow>) -> Result<Vec<Document>, DocumentStoreError> {
    rows.into_iter().map(DocumentRow::into_document).collect()
}

/// Diesel-backed implementation of [`DocumentStore`].
#[derive(Clone)]
pub struct DieselDocumentStore {
    pool: DbPool,
}

impl DieselDocumentStore {
    /// Create a store over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create the backing table when it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns a connection error if the database is unreachable and a query
    /// error if the DDL fails.
    pub async fn ensure_collection(&self) -> Result<(), DocumentStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        sql_query(CREATE_COLLECTION_SQL)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "ensure books table"))?;
        info!("books table ready");
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for DieselDocumentStore {
    async fn save(&self, mut document: Document) -> Result<Document, DocumentStoreError> {
        let id = match document_id(&document) {
            Some(id) => id.to_owned(),
            None => Uuid::new_v4().to_string(),
        };
        document.insert(ID_KEY.to_owned(), Value::String(id.clone()));
        let body = Value::Object(document.clone());

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        sql_query(UPSERT_SQL)
            .bind::<Text, _>(&id)
            .bind::<Jsonb, _>(&body)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "upsert book document"))?;

        Ok(document)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Document>, DocumentStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = sql_query(FIND_BY_ID_SQL)
            .bind::<Text, _>(id)
            .get_result::<DocumentRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find book document"))?;

        row.map(DocumentRow::into_document).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Document>, DocumentStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = sql_query(FIND_ALL_SQL)
            .load::<DocumentRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list book documents"))?;

        into_documents(rows)
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), DocumentStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        sql_query(DELETE_SQL)
            .bind::<Text, _>(id)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "delete book document"))?;
        Ok(())
    }

    async fn query(&self, criteria: &FieldMatch) -> Result<Vec<Document>, DocumentStoreError> {
        let pattern = contains_pattern(criteria.needle());
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = sql_query(QUERY_SQL)
            .bind::<Text, _>(criteria.field())
            .bind::<Text, _>(&pattern)
            .load::<DocumentRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "search book documents"))?;

        into_documents(rows)
    }
}
