//! Builders for the document store and the HTTP state wired on top of it.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use book_catalog::domain::CatalogService;
use book_catalog::domain::ports::TokenVerifier;
use book_catalog::inbound::http::state::HttpState;
use book_catalog::outbound::document_store::{
    DocumentBookRepository, DocumentStore, InMemoryDocumentStore,
};
use book_catalog::outbound::persistence::{DbPool, DieselDocumentStore};

use super::ServerConfig;

/// Select the document store: PostgreSQL when a pool is configured, memory
/// otherwise. The PostgreSQL collection is created on first start.
async fn build_document_store(pool: Option<&DbPool>) -> std::io::Result<Arc<dyn DocumentStore>> {
    match pool {
        Some(pool) => {
            let store = DieselDocumentStore::new(pool.clone());
            store
                .ensure_collection()
                .await
                .map_err(|err| std::io::Error::other(format!("book store setup failed: {err}")))?;
            info!(store = "postgres", "book store initialised");
            Ok(Arc::new(store))
        }
        None => {
            info!(store = "memory", "book store initialised");
            Ok(Arc::new(InMemoryDocumentStore::new()))
        }
    }
}

/// Wire the catalog service over `store` into handler state.
pub(super) fn build_state_over(store: Arc<dyn DocumentStore>, tokens: Arc<dyn TokenVerifier>) -> HttpState {
    let repository = Arc::new(DocumentBookRepository::new(store));
    let catalog = Arc::new(CatalogService::new(repository));
    HttpState::new(catalog.clone(), catalog, tokens)
}

/// Build the shared HTTP state from the configured store and verifier.
pub(super) async fn build_http_state(
    config: &ServerConfig,
) -> std::io::Result<web::Data<HttpState>> {
    let store = build_document_store(config.db_pool.as_ref()).await?;
    Ok(web::Data::new(build_state_over(
        store,
        config.tokens.clone(),
    )))
}
