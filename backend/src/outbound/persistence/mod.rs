//! PostgreSQL persistence adapters using Diesel.
//!
//! Adapters only translate between rows and documents. Connections come from
//! a `bb8` pool driven by `diesel-async`; every database error is mapped to a
//! [`DocumentStoreError`](crate::outbound::document_store::DocumentStoreError).
//!
//! # Example
//!
//! ```ignore
//! use book_catalog::outbound::persistence::{DbPool, DieselDocumentStore, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/catalog")).await?;
//! let store = DieselDocumentStore::new(pool);
//! store.ensure_collection().await?;
//! ```

mod diesel_document_store;
pub(crate) mod diesel_helpers;
mod pool;

pub use diesel_document_store::DieselDocumentStore;
pub use pool::{DbPool, PoolConfig, PoolError};
