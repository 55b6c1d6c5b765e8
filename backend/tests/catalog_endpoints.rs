//! End-to-end tests for the catalog HTTP surface over the in-memory store.

#[path = "support/catalog_app.rs"]
mod catalog_app;

use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::test as actix_test;
use async_trait::async_trait;
use catalog_app::{bearer, catalog_app, memory_state, state_over, token_for};
use rstest::rstest;
use serde_json::{Value, json};

use book_catalog::domain::ports::{BookRepository, BookRepositoryError};
use book_catalog::domain::{Book, BookField, BookId, TRACE_ID_HEADER};

/// Repository whose database never answers.
struct UnreachableRepository;

impl UnreachableRepository {
    fn refusal() -> BookRepositoryError {
        BookRepositoryError::connection(
            "connection to server at \"10.0.3.7\", port 5432 failed: \
             password authentication failed for user \"catalog_admin\"",
        )
    }
}

#[async_trait]
impl BookRepository for UnreachableRepository {
    async fn find_by_id(&self, _id: &BookId) -> Result<Option<Book>, BookRepositoryError> {
        Err(Self::refusal())
    }

    async fn find_all(&self) -> Result<Vec<Book>, BookRepositoryError> {
        Err(Self::refusal())
    }

    async fn save(&self, _book: &Book) -> Result<Book, BookRepositoryError> {
        Err(Self::refusal())
    }

    async fn delete_by_id(&self, _id: &BookId) -> Result<(), BookRepositoryError> {
        Err(Self::refusal())
    }

    async fn find_by_field_containing(
        &self,
        _field: BookField,
        _term: &str,
    ) -> Result<Vec<Book>, BookRepositoryError> {
        Err(Self::refusal())
    }
}

async fn read_json(response: actix_web::dev::ServiceResponse) -> Value {
    let body = actix_test::read_body(response).await;
    serde_json::from_slice(&body).expect("JSON body")
}

#[rstest]
#[actix_web::test]
async fn create_update_delete_lifecycle() {
    let app = actix_test::init_service(catalog_app(memory_state())).await;

    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/Books")
            .insert_header(bearer())
            .set_json(json!({"title": "Dune"}))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::OK);
    assert_eq!(read_json(created).await, json!({"id": "1", "title": "Dune"}));

    let fetched = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/Book/1")
            .insert_header(bearer())
            .to_request(),
    )
    .await;
    assert_eq!(read_json(fetched).await, json!({"id": "1", "title": "Dune"}));

    let updated = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/Books")
            .insert_header(bearer())
            .set_json(json!({"id": "1", "title": "Dune Messiah"}))
            .to_request(),
    )
    .await;
    assert_eq!(read_json(updated).await, json!(true));

    let fetched = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/Book/1")
            .insert_header(bearer())
            .to_request(),
    )
    .await;
    assert_eq!(
        read_json(fetched).await,
        json!({"id": "1", "title": "Dune Messiah"})
    );

    for expected in [true, false] {
        let deleted = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri("/api/Books?id=1")
                .insert_header(bearer())
                .to_request(),
        )
        .await;
        assert_eq!(deleted.status(), StatusCode::OK);
        assert_eq!(read_json(deleted).await, json!(expected));
    }

    let missing = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/Book/1")
            .insert_header(bearer())
            .to_request(),
    )
    .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn update_of_unknown_book_leaves_the_store_untouched() {
    let app = actix_test::init_service(catalog_app(memory_state())).await;

    let updated = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/Books")
            .insert_header(bearer())
            .set_json(json!({"id": "42", "title": "Ghost"}))
            .to_request(),
    )
    .await;
    assert_eq!(read_json(updated).await, json!(false));

    let listed = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/Books")
            .insert_header(bearer())
            .to_request(),
    )
    .await;
    assert_eq!(read_json(listed).await, json!([]));
}

#[rstest]
#[case::empty(&[])]
#[case::single(&["Dune"])]
#[case::several(&["Dune", "Dune Messiah", "Neuromancer", "Hyperion"])]
#[actix_web::test]
async fn listing_returns_every_stored_book(#[case] titles: &[&str]) {
    let app = actix_test::init_service(catalog_app(memory_state())).await;
    let mut expected = Vec::new();
    for title in titles {
        let created = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/Books")
                .insert_header(bearer())
                .set_json(json!({"title": title}))
                .to_request(),
        )
        .await;
        assert_eq!(created.status(), StatusCode::OK);
        expected.push(read_json(created).await);
    }

    let listed = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/Books")
            .insert_header(bearer())
            .to_request(),
    )
    .await;

    assert_eq!(listed.status(), StatusCode::OK);
    assert_eq!(read_json(listed).await, Value::Array(expected));
}

#[rstest]
#[actix_web::test]
async fn store_outage_is_reported_without_driver_detail() {
    let state = state_over(Arc::new(UnreachableRepository));
    let app = actix_test::init_service(catalog_app(state)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/Books")
            .insert_header(bearer())
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = read_json(response).await;
    assert_eq!(body["code"], "service_unavailable");
    assert_eq!(body["message"], "book store unavailable");
    let rendered = body.to_string();
    assert!(!rendered.contains("10.0.3.7"));
    assert!(!rendered.contains("catalog_admin"));
}

#[rstest]
#[case::title_lowercase("title", "DUNE", &["Dune", "Dune Messiah"])]
#[case::author_mixed_case("Author", "herb", &["Dune", "Dune Messiah"])]
#[case::partial_match("TITLE", "messiah", &["Dune Messiah"])]
#[case::regex_metacharacters("title", ".*", &[])]
#[case::unknown_field("shelf", "dune", &[])]
#[actix_web::test]
async fn criteria_search_matches_substrings_ignoring_case(
    #[case] criteria: &str,
    #[case] search: &str,
    #[case] expected_titles: &[&str],
) {
    let app = actix_test::init_service(catalog_app(memory_state())).await;
    for (title, author) in [
        ("Dune", "Frank Herbert"),
        ("Dune Messiah", "Frank Herbert"),
        ("Neuromancer", "William Gibson"),
    ] {
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/Books")
                .insert_header(bearer())
                .set_json(json!({"title": title, "author": author}))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/Books/{criteria}/{search}"))
            .insert_header(bearer())
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    let titles: Vec<&str> = body
        .as_array()
        .expect("array body")
        .iter()
        .filter_map(|book| book["title"].as_str())
        .collect();
    assert_eq!(titles, expected_titles);
}

#[rstest]
#[case::missing(None, "missing bearer token")]
#[case::wrong_scheme(Some("Basic cmVhZGVyOnNlY3JldA==".to_owned()), "authorization header must use the Bearer scheme")]
#[case::expired(Some(format!("Bearer {}", token_for("reader", -600))), "bearer token expired")]
#[case::forged(Some("Bearer not.a.jwt".to_owned()), "invalid bearer token")]
#[actix_web::test]
async fn requests_without_a_valid_token_are_unauthorised(
    #[case] authorization: Option<String>,
    #[case] message: &str,
) {
    let app = actix_test::init_service(catalog_app(memory_state())).await;
    let mut request = actix_test::TestRequest::get().uri("/api/Books");
    if let Some(value) = authorization {
        request = request.insert_header((header::AUTHORIZATION, value));
    }

    let response = actix_test::call_service(&app, request.to_request()).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response
            .headers()
            .get(header::WWW_AUTHENTICATE)
            .and_then(|value| value.to_str().ok()),
        Some("Bearer")
    );
    let trace_header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");
    let body = read_json(response).await;
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(body["message"], message);
    assert_eq!(body["traceId"], trace_header.as_str());
}

#[rstest]
#[actix_web::test]
async fn token_signed_with_another_key_is_rejected() {
    use jsonwebtoken::{EncodingKey, Header, encode, get_current_timestamp};

    let token = encode(
        &Header::default(),
        &json!({"sub": "intruder", "exp": get_current_timestamp() + 300}),
        &EncodingKey::from_secret(b"some-other-secret"),
    )
    .expect("token encodes");
    let app = actix_test::init_service(catalog_app(memory_state())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/Books")
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
