//! The bearer middleware must reject every broken credential with the same
//! 401 and the same body, no matter which check actually failed.

use actix_http::Request;
use actix_web::dev::Service;
use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::error_contract::assert_error_from_service_error;
use notes_backend::test_support::{test_app, test_state, TokenMint};

#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

fn ping_request() -> test::TestRequest {
    test::TestRequest::get().uri("/api/ping")
}

async fn assert_rejected(req: Request) {
    let app = test_app(test_state()).await;
    let err = app.call(req).await.expect_err("expected auth rejection");
    assert_error_from_service_error(err, StatusCode::UNAUTHORIZED, "missing_or_invalid_token")
        .await;
}

#[actix_web::test]
async fn missing_header_is_rejected() {
    assert_rejected(ping_request().to_request()).await;
}

#[actix_web::test]
async fn wrong_scheme_is_rejected() {
    assert_rejected(
        ping_request()
            .insert_header(("Authorization", "Token abc"))
            .to_request(),
    )
    .await;
}

#[actix_web::test]
async fn empty_token_is_rejected() {
    assert_rejected(
        ping_request()
            .insert_header(("Authorization", "Bearer "))
            .to_request(),
    )
    .await;
}

#[actix_web::test]
async fn garbage_token_is_rejected() {
    assert_rejected(
        ping_request()
            .insert_header(("Authorization", "Bearer not.a.jwt"))
            .to_request(),
    )
    .await;
}

#[actix_web::test]
async fn expired_token_is_rejected() {
    let token = TokenMint::for_subject("alice").expired().token();
    assert_rejected(
        ping_request()
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request(),
    )
    .await;
}

#[actix_web::test]
async fn wrong_issuer_is_rejected() {
    let token = TokenMint::for_subject("alice")
        .issuer("http://evil.example/realms/notes")
        .token();
    assert_rejected(
        ping_request()
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request(),
    )
    .await;
}

#[actix_web::test]
async fn wrong_signing_key_is_rejected() {
    let token = TokenMint::for_subject("alice").wrong_key().token();
    assert_rejected(
        ping_request()
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request(),
    )
    .await;
}

#[actix_web::test]
async fn unknown_kid_is_rejected() {
    let token = TokenMint::for_subject("alice").kid("other-key").token();
    assert_rejected(
        ping_request()
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request(),
    )
    .await;
}

#[actix_web::test]
async fn hs256_token_is_rejected() {
    let token = TokenMint::for_subject("alice").hs256();
    assert_rejected(
        ping_request()
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request(),
    )
    .await;
}

#[actix_web::test]
async fn notes_routes_are_guarded_too() {
    let app = test_app(test_state()).await;

    let get = test::TestRequest::get().uri("/api/notes").to_request();
    let err = app.call(get).await.expect_err("expected auth rejection");
    assert_error_from_service_error(err, StatusCode::UNAUTHORIZED, "missing_or_invalid_token")
        .await;

    let post = test::TestRequest::post()
        .uri("/api/notes")
        .set_json(serde_json::json!({ "text": "hello" }))
        .to_request();
    let err = app.call(post).await.expect_err("expected auth rejection");
    assert_error_from_service_error(err, StatusCode::UNAUTHORIZED, "missing_or_invalid_token")
        .await;
}

#[actix_web::test]
async fn valid_token_reaches_ping() {
    let app = test_app(test_state()).await;
    let token = TokenMint::for_subject("alice").token();

    let req = ping_request()
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "pong");
    assert_eq!(body["sub"], "alice");
}
