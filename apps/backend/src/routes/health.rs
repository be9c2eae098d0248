use actix_web::HttpResponse;
use serde::Serialize;

use crate::error::AppError;

#[derive(Debug, Serialize)]
struct HealthResponse {
    ok: bool,
}

/// Liveness probe. No auth, no state.
pub async fn health() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(HealthResponse { ok: true }))
}
