//! JSON body extractor with a stable error shape.
//!
//! A payload that does not decode (malformed JSON, wrong content shape,
//! oversized body) becomes the fixed `400 {"error": "invalid_body"}` rather
//! than a framework-specific error response.

use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::AppError;

/// Generous for a notes payload; anything bigger is not a legitimate request.
const MAX_BODY_BYTES: usize = 16 * 1024;

#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<T> JsonBody<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for JsonBody<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> FromRequest for JsonBody<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(_req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();

        Box::pin(async move {
            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|e| {
                    debug!(error = %e, "failed to read request body");
                    AppError::validation("invalid_body")
                })?;
                if body.len() + chunk.len() > MAX_BODY_BYTES {
                    debug!("request body exceeds limit");
                    return Err(AppError::validation("invalid_body"));
                }
                body.extend_from_slice(&chunk);
            }

            serde_json::from_slice::<T>(&body)
                .map(JsonBody)
                .map_err(|e| {
                    debug!(error = %e, "request body did not decode");
                    AppError::validation("invalid_body")
                })
        })
    }
}
