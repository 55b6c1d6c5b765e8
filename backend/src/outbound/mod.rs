//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **document_store**: schemaless document client surface, the in-memory
//!   adapter and the book repository built on top of it
//! - **persistence**: PostgreSQL-backed document store using Diesel
//! - **auth**: bearer token verification backed by `jsonwebtoken`
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod auth;
pub mod document_store;
pub mod persistence;
