//! Domain primitives, services and ports.
//!
//! Purpose: define the catalog's entities and use-cases independent of HTTP
//! and storage. Keep types transport agnostic; adapters in `inbound` and
//! `outbound` translate to and from them.
//!
//! Public surface:
//! - Book, BookId, BookField — the catalog entity and its searchable fields.
//! - CatalogService — criteria search and existence-checked mutation.
//! - Error, ErrorCode — transport-agnostic failure payload.
//! - Principal — verified bearer-token identity.
//! - TraceId — request correlation identifier.

pub mod book;
pub mod catalog_service;
pub mod error;
pub mod ports;
pub mod principal;
pub mod trace_id;

pub use self::book::{Book, BookField, BookId, BookIdValidationError, UnknownBookField};
pub use self::catalog_service::CatalogService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::principal::Principal;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
