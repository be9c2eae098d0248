//! The stable response envelope: request ids on responses and the fixed
//! JSON error shape for handler-origin failures.

use actix_web::test;
use notes_backend::test_support::{test_app, test_state, TokenMint};

#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

#[actix_web::test]
async fn success_responses_carry_a_request_id() {
    let app = test_app(test_state()).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    let request_id = resp
        .headers()
        .get("x-request-id")
        .expect("x-request-id header should be present")
        .to_str()
        .unwrap();
    assert!(!request_id.is_empty());
}

#[actix_web::test]
async fn handler_errors_keep_the_request_id_and_shape() {
    let app = test_app(test_state()).await;
    let token = TokenMint::for_subject("alice").token();

    let req = test::TestRequest::post()
        .uri("/api/notes")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(serde_json::json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 400);
    assert!(resp.headers().get("x-request-id").is_some());

    let content_type = resp
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("application/json"));

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, serde_json::json!({ "error": "text required" }));
}

#[actix_web::test]
async fn request_ids_differ_between_requests() {
    let app = test_app(test_state()).await;

    let mut seen = Vec::new();
    for _ in 0..2 {
        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        seen.push(
            resp.headers()
                .get("x-request-id")
                .unwrap()
                .to_str()
                .unwrap()
                .to_string(),
        );
    }
    assert_ne!(seen[0], seen[1]);
}
