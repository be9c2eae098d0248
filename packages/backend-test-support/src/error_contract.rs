//! Assertions for the stable error contract.
//!
//! Every error the backend emits is `{"error": "<stable string>"}` with a
//! fixed status code, whether it comes from a handler, an extractor, or the
//! bearer middleware. These helpers validate that contract without
//! depending on backend types.

use actix_web::body::{to_bytes, BoxBody};
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Deserialize;

/// Local mirror of the backend's error body.
#[derive(Debug, Deserialize)]
struct ErrorBodyLike {
    error: String,
}

/// Assert status and body on a response that went through the service.
pub async fn assert_error_from_service_response(
    resp: ServiceResponse<BoxBody>,
    expected_status: StatusCode,
    expected_error: &str,
) {
    let status = resp.status();
    let body = actix_web::test::read_body(resp).await;
    assert_error_from_parts(status, &body, expected_status, expected_error);
}

/// Assert status and body on an error returned by the service itself (the
/// middleware short-circuit path), by rendering it the way the server would.
pub async fn assert_error_from_service_error(
    err: actix_web::Error,
    expected_status: StatusCode,
    expected_error: &str,
) {
    let resp = HttpResponse::from_error(err);
    let status = resp.status();
    let body = to_bytes(resp.into_body())
        .await
        .expect("error body should materialise");
    assert_error_from_parts(status, &body, expected_status, expected_error);
}

pub fn assert_error_from_parts(
    status: StatusCode,
    body: &[u8],
    expected_status: StatusCode,
    expected_error: &str,
) {
    assert_eq!(status, expected_status);

    let parsed: ErrorBodyLike =
        serde_json::from_slice(body).expect("error body should be the stable JSON shape");
    assert_eq!(parsed.error, expected_error);

    // The contract is exactly one key; nothing internal may leak alongside.
    let value: serde_json::Value = serde_json::from_slice(body).expect("error body is JSON");
    assert_eq!(
        value.as_object().map(|obj| obj.len()),
        Some(1),
        "error body must contain only the `error` key: {value}"
    );
}
