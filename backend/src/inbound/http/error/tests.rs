//! Tests for HTTP error mapping.

use super::*;
use crate::domain::{Error, TraceId};
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, ResponseError, test as actix_test, web};
use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, then, when};
use serde_json::{Value, json};

const TRACE_ID: &str = "b2e6c0de-51a4-4c7e-8f0a-7d3b9e1a6c42";

#[fixture]
fn trace_id() -> TraceId {
    TRACE_ID.parse().expect("fixture is a valid UUID")
}

#[fixture]
fn internal_error_case(trace_id: TraceId) -> Error {
    Error::internal("book store error: relation \"books\" does not exist")
        .with_trace_id(trace_id)
        .with_details(json!({"sql": "SELECT"}))
}

#[fixture]
fn invalid_request_case(trace_id: TraceId) -> Error {
    Error::invalid_request("book id must not be empty")
        .with_trace_id(trace_id)
        .with_details(json!({"field": "id"}))
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("no auth"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("denied"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("clash"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

async fn assert_error_response(
    error: Error,
    expected_status: StatusCode,
    expected_trace_id: Option<&str>,
) -> Error {
    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), expected_status);

    let header = response.headers().get(TRACE_ID_HEADER);
    match expected_trace_id {
        Some(expected) => {
            let trace_id = header
                .expect("trace-id header is set by error_response")
                .to_str()
                .expect("trace-id not valid UTF-8");
            assert_eq!(trace_id, expected);
        }
        None => assert!(header.is_none(), "trace-id header should not be present"),
    }

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");

    serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds")
}

#[rstest]
#[actix_web::test]
async fn error_responses_include_trace_id_and_payloads(
    #[from(internal_error_case)] internal_error: Error,
    #[from(invalid_request_case)] invalid_request: Error,
    trace_id: TraceId,
) {
    let redacted = assert_error_response(
        internal_error,
        StatusCode::INTERNAL_SERVER_ERROR,
        Some(TRACE_ID),
    )
    .await;
    assert_eq!(redacted.code(), ErrorCode::InternalError);
    assert_eq!(redacted.message(), "Internal server error");
    assert!(redacted.details().is_none());
    assert_eq!(redacted.trace_id(), Some(trace_id));

    let payload = assert_error_response(
        invalid_request,
        StatusCode::BAD_REQUEST,
        Some(TRACE_ID),
    )
    .await;
    assert_eq!(payload.code(), ErrorCode::InvalidRequest);
    assert_eq!(payload.message(), "book id must not be empty");
    assert_eq!(payload.details(), Some(&json!({"field": "id"})));
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let error = Error::not_found("book 7 not found");

    let payload = assert_error_response(error, StatusCode::NOT_FOUND, None).await;
    assert_eq!(payload.code(), ErrorCode::NotFound);
    assert_eq!(payload.trace_id(), None);
}

#[rstest]
fn unauthorized_responses_carry_bearer_challenge() {
    let response = ResponseError::error_response(&Error::unauthorized("missing bearer token"));

    let challenge = response
        .headers()
        .get(header::WWW_AUTHENTICATE)
        .and_then(|value| value.to_str().ok());
    assert_eq!(challenge, Some(BEARER_CHALLENGE));
}

#[rstest]
fn other_errors_do_not_challenge() {
    let response = ResponseError::error_response(&Error::forbidden("no"));
    assert!(response.headers().get(header::WWW_AUTHENTICATE).is_none());
}

#[given("a service unavailable error code")]
fn a_service_unavailable_error_code() -> ErrorCode {
    ErrorCode::ServiceUnavailable
}

#[when("the adapter maps the code to an HTTP status")]
fn the_adapter_maps_the_code_to_http_status(code: ErrorCode) -> StatusCode {
    super::status_for(code)
}

#[then("the status is 503 Service Unavailable")]
fn the_status_is_503(status: StatusCode) {
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[rstest]
fn service_unavailable_maps_to_503() {
    let code = a_service_unavailable_error_code();
    let status = the_adapter_maps_the_code_to_http_status(code);
    the_status_is_503(status);
}

#[test]
fn from_actix_error_is_redacted_internal_error() {
    use actix_web::error;

    let actix_err = error::ErrorBadRequest("boom");
    let err: Error = actix_err.into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.trace_id(), None);
    assert_eq!(err.details(), None);
}

#[rstest]
#[case::malformed("{\"title\": ", "application/json")]
#[case::wrong_shape("[1, 2]", "application/json")]
#[case::wrong_type("{\"publishedYear\": \"soon\"}", "application/json")]
#[case::content_type("{}", "text/plain")]
#[actix_web::test]
async fn json_body_errors_use_the_error_envelope(#[case] body: &str, #[case] content_type: &str) {
    let app = actix_test::init_service(App::new().app_data(json_config()).route(
        "/echo",
        web::post().to(|book: web::Json<crate::domain::Book>| async move {
            HttpResponse::Ok().json(book.into_inner())
        }),
    ))
    .await;

    let request = actix_test::TestRequest::post()
        .uri("/echo")
        .insert_header((header::CONTENT_TYPE, content_type))
        .set_payload(body.to_owned())
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["code"], "invalid_request");
}
