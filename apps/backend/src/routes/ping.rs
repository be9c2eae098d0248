use actix_web::HttpResponse;
use serde::Serialize;

use crate::error::AppError;
use crate::extractors::CurrentUser;

#[derive(Debug, Serialize)]
struct PingResponse {
    message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sub: Option<String>,
}

/// Protected connectivity check; echoes the caller's subject.
pub async fn ping(user: CurrentUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(PingResponse {
        message: "pong",
        sub: Some(user.sub),
    }))
}
