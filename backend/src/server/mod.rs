//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use book_catalog::Trace;
#[cfg(debug_assertions)]
use book_catalog::doc::openapi_with_issuer;
use book_catalog::inbound::http::books;
use book_catalog::inbound::http::error::{json_config, query_config};
use book_catalog::inbound::http::health::{HealthState, live, ready};
use book_catalog::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    /// Issuer advertised by the Swagger UI document.
    #[cfg(debug_assertions)]
    issuer: Option<String>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api").configure(books::configure);

    let app = App::new()
        .app_data(deps.health_state)
        .app_data(deps.http_state)
        .app_data(json_config())
        .app_data(query_config())
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs").url(
            "/api-docs/openapi.json",
            openapi_with_issuer(deps.issuer.as_deref()),
        ),
    );

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state, marked ready once the book store
///   is initialised and the socket is bound.
/// - `config`: pre-built [`ServerConfig`] with the bind address, token
///   verifier and optional database pool.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when preparing the book store, binding the
/// socket or starting the server fails.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config).await?;
    let bind_addr = config.bind_addr;
    #[cfg(debug_assertions)]
    let issuer = config.issuer;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            #[cfg(debug_assertions)]
            issuer: issuer.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::test;
    #[cfg(debug_assertions)]
    use book_catalog::doc::OAUTH2_SCHEME;
    use book_catalog::domain::Principal;
    use book_catalog::domain::ports::{TokenVerificationError, TokenVerifier};
    use book_catalog::outbound::document_store::InMemoryDocumentStore;
    use rstest::rstest;
    #[cfg(debug_assertions)]
    use serde_json::Value;

    use super::{AppDependencies, HealthState, build_app, web};
    use super::state_builders::build_state_over;

    struct RejectAll;

    impl TokenVerifier for RejectAll {
        fn verify(&self, _token: &str) -> Result<Principal, TokenVerificationError> {
            Err(TokenVerificationError::invalid_signature())
        }
    }

    fn dependencies() -> AppDependencies {
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: web::Data::new(build_state_over(
                Arc::new(InMemoryDocumentStore::new()),
                Arc::new(RejectAll),
            )),
            #[cfg(debug_assertions)]
            issuer: None,
        }
    }

    #[rstest]
    #[actix_rt::test]
    async fn health_and_book_routes_are_mounted() {
        let app = test::init_service(build_app(dependencies())).await;

        let live = test::call_service(&app, test::TestRequest::get().uri("/health/live").to_request()).await;
        assert!(live.status().is_success());

        let books = test::call_service(&app, test::TestRequest::get().uri("/api/Books").to_request()).await;
        assert_eq!(books.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[cfg(debug_assertions)]
    #[rstest]
    #[actix_rt::test]
    async fn swagger_document_advertises_the_configured_issuer() {
        let deps = AppDependencies {
            issuer: Some("https://id.example/realms/books".to_owned()),
            ..dependencies()
        };
        let app = test::init_service(build_app(deps)).await;
        let doc: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api-docs/openapi.json").to_request(),
        )
        .await;

        let flow = &doc["components"]["securitySchemes"][OAUTH2_SCHEME]["flows"]["implicit"];
        assert_eq!(
            flow["authorizationUrl"],
            "https://id.example/realms/books/protocol/openid-connect/auth"
        );
    }

    #[cfg(debug_assertions)]
    #[rstest]
    #[actix_rt::test]
    async fn swagger_document_omits_the_flow_without_an_issuer() {
        let app = test::init_service(build_app(dependencies())).await;
        let doc: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api-docs/openapi.json").to_request(),
        )
        .await;

        assert!(doc["components"]["securitySchemes"].get(OAUTH2_SCHEME).is_none());
    }
}
