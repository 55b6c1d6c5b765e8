//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CatalogCommand, CatalogQuery, TokenVerifier};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Read side of the catalog.
    pub catalog_query: Arc<dyn CatalogQuery>,
    /// Write side of the catalog.
    pub catalog_command: Arc<dyn CatalogCommand>,
    /// Bearer token verification used by the authentication extractor.
    pub tokens: Arc<dyn TokenVerifier>,
}

impl HttpState {
    /// Construct state from port implementations.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use book_catalog::domain::CatalogService;
    /// use book_catalog::inbound::http::state::HttpState;
    /// use book_catalog::outbound::auth::JwtTokenVerifier;
    /// use book_catalog::outbound::document_store::{DocumentBookRepository, InMemoryDocumentStore};
    ///
    /// let repository = Arc::new(DocumentBookRepository::new(Arc::new(InMemoryDocumentStore::new())));
    /// let service = Arc::new(CatalogService::new(repository));
    /// let state = HttpState::new(
    ///     service.clone(),
    ///     service,
    ///     Arc::new(JwtTokenVerifier::hs256(b"secret")),
    /// );
    /// let _query = state.catalog_query.clone();
    /// ```
    pub fn new(
        catalog_query: Arc<dyn CatalogQuery>,
        catalog_command: Arc<dyn CatalogCommand>,
        tokens: Arc<dyn TokenVerifier>,
    ) -> Self {
        Self {
            catalog_query,
            catalog_command,
            tokens,
        }
    }
}
