//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use book_catalog::domain::ports::TokenVerifier;
use book_catalog::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) tokens: Arc<dyn TokenVerifier>,
    #[cfg(debug_assertions)]
    pub(crate) issuer: Option<String>,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration around the bearer token verifier.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, tokens: Arc<dyn TokenVerifier>) -> Self {
        Self {
            bind_addr,
            tokens,
            #[cfg(debug_assertions)]
            issuer: None,
            db_pool: None,
        }
    }

    /// Attach a database connection pool for the document store.
    ///
    /// Without a pool the server keeps books in memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Advertise the token issuer in the Swagger UI document.
    #[cfg(debug_assertions)]
    #[must_use]
    pub fn with_issuer(mut self, issuer: Option<String>) -> Self {
        self.issuer = issuer;
        self
    }
}
