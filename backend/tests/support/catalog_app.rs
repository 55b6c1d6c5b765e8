//! Shared wiring for catalog integration tests.
//!
//! Builds the same application as the server binary, backed by the in-memory
//! document store and an HS256 verifier, and mints bearer tokens for it.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{App, web};
use jsonwebtoken::{EncodingKey, Header, encode, get_current_timestamp};
use serde::Serialize;

use book_catalog::Trace;
use book_catalog::domain::CatalogService;
use book_catalog::domain::ports::BookRepository;
use book_catalog::inbound::http::books;
use book_catalog::inbound::http::error::{json_config, query_config};
use book_catalog::inbound::http::state::HttpState;
use book_catalog::outbound::auth::JwtTokenVerifier;
use book_catalog::outbound::document_store::{DocumentBookRepository, InMemoryDocumentStore};

pub(crate) const SECRET: &[u8] = b"integration-secret";

#[derive(Serialize)]
struct Claims<'a> {
    sub: &'a str,
    exp: u64,
}

/// Mint a token for `subject` signed with [`SECRET`], expiring after `ttl_secs`.
pub(crate) fn token_for(subject: &str, ttl_secs: i64) -> String {
    let now = get_current_timestamp();
    let exp = now.saturating_add_signed(ttl_secs);
    encode(
        &Header::default(),
        &Claims { sub: subject, exp },
        &EncodingKey::from_secret(SECRET),
    )
    .expect("token encodes")
}

/// `Authorization` header carrying a valid token.
pub(crate) fn bearer() -> (header::HeaderName, String) {
    (
        header::AUTHORIZATION,
        format!("Bearer {}", token_for("reader", 300)),
    )
}

/// Handler state over a fresh in-memory store.
pub(crate) fn memory_state() -> web::Data<HttpState> {
    let repository = Arc::new(DocumentBookRepository::new(Arc::new(
        InMemoryDocumentStore::new(),
    )));
    state_over(repository)
}

/// Handler state over an arbitrary repository.
pub(crate) fn state_over<R>(repository: Arc<R>) -> web::Data<HttpState>
where
    R: BookRepository + 'static,
{
    let catalog = Arc::new(CatalogService::new(repository));
    web::Data::new(HttpState::new(
        catalog.clone(),
        catalog,
        Arc::new(JwtTokenVerifier::hs256(SECRET)),
    ))
}

/// The catalog application as the server assembles it.
pub(crate) fn catalog_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .app_data(json_config())
        .app_data(query_config())
        .wrap(Trace)
        .service(web::scope("/api").configure(books::configure))
}
