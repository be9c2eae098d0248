use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::trace_ctx;

/// Stable JSON error body. This shape is part of the wire contract and the
/// single thing a caller ever learns about a failure.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    /// Any token problem: missing header, malformed token, unknown key,
    /// bad signature, wrong issuer, expired. Collapsed to one message so
    /// callers cannot probe which check failed.
    #[error("Unauthorized")]
    Unauthorized,
    /// The identity provider could not serve signing keys (unreachable,
    /// timed out, rate limited, or returned garbage). Rendered as a plain
    /// authentication failure; the detail only goes to the log.
    #[error("Upstream identity provider failure: {detail}")]
    Upstream { detail: String },
    /// Bad request payload. `error` is the exact string sent to the client.
    #[error("Validation error: {error}")]
    Validation { error: &'static str },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    pub fn unauthorized() -> Self {
        Self::Unauthorized
    }

    pub fn upstream(detail: impl Into<String>) -> Self {
        Self::Upstream {
            detail: detail.into(),
        }
    }

    pub fn validation(error: &'static str) -> Self {
        Self::Validation { error }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::Upstream { .. } => StatusCode::UNAUTHORIZED,
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Config { .. } | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The client-facing error string. Auth failures all map to the same
    /// value; internal faults leak nothing.
    fn client_error(&self) -> &'static str {
        match self {
            AppError::Unauthorized | AppError::Upstream { .. } => "missing_or_invalid_token",
            AppError::Validation { error } => error,
            AppError::Config { .. } | AppError::Internal { .. } => "internal_error",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        // Log the real cause here, at the single translation point.
        match self {
            AppError::Upstream { detail } => {
                warn!(detail = %detail, "identity provider key fetch failed");
            }
            AppError::Config { detail } | AppError::Internal { detail } => {
                error!(detail = %detail, "internal error");
            }
            _ => {}
        }

        let body = ErrorBody {
            error: self.client_error().to_string(),
        };

        let mut builder = HttpResponse::build(self.status());
        if let Some(request_id) = trace_ctx::request_id() {
            builder.insert_header(("x-request-id", request_id));
        }
        builder.json(body)
    }
}
