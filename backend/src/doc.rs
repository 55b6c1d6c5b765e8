//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the catalog and health endpoints, the schema wrappers
//! for domain types, and a bearer JWT security scheme. When the token issuer
//! is known, [`openapi_with_issuer`] also advertises the issuer's OAuth2
//! implicit flow so Swagger UI can obtain tokens interactively.
//!
//! The generated specification is served to Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::schemas::{BookSchema, ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{
    Flow, HttpAuthScheme, HttpBuilder, Implicit, OAuth2, Scopes, SecurityRequirement,
    SecurityScheme,
};
use utoipa::{Modify, OpenApi};

/// Name of the bearer token security scheme.
pub const BEARER_SCHEME: &str = "BearerAuth";
/// Name of the OAuth2 implicit flow security scheme.
pub const OAUTH2_SCHEME: &str = "OAuth2";

/// Enrich the generated document with the bearer JWT security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Access token issued by the identity provider."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Book Catalog Service",
        description = "A service providing book catalog.",
        version = "1.0"
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::books::list_books,
        crate::inbound::http::books::search_books,
        crate::inbound::http::books::get_book,
        crate::inbound::http::books::create_book,
        crate::inbound::http::books::update_book,
        crate::inbound::http::books::delete_book,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(BookSchema, ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "books", description = "Book catalog operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

/// Authorization endpoint of an OpenID Connect issuer.
///
/// # Examples
/// ```
/// use book_catalog::doc::authorization_url;
///
/// assert_eq!(
///     authorization_url("https://id.example/realms/books/"),
///     "https://id.example/realms/books/protocol/openid-connect/auth"
/// );
/// ```
pub fn authorization_url(issuer: &str) -> String {
    format!(
        "{}/protocol/openid-connect/auth",
        issuer.trim_end_matches('/')
    )
}

/// Build the OpenAPI document, adding the OAuth2 implicit flow for `issuer`.
pub fn openapi_with_issuer(issuer: Option<&str>) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    let Some(issuer) = issuer else {
        return doc;
    };

    let flow = Flow::Implicit(Implicit::new(
        authorization_url(issuer),
        Scopes::from_iter([("openid", "OpenID Connect sign-in")]),
    ));
    doc.components
        .get_or_insert_with(utoipa::openapi::Components::default)
        .add_security_scheme(OAUTH2_SCHEME, SecurityScheme::OAuth2(OAuth2::new([flow])));
    doc.security
        .get_or_insert_with(Vec::new)
        .push(SecurityRequirement::new(OAUTH2_SCHEME, ["openid"]));
    doc
}
