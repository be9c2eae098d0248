//! Per-request context middleware.
//!
//! One middleware owns the whole request-observability concern:
//! - generates a request id, stores it in request extensions and in the
//!   task-local scope (`trace_ctx`) so the error translation can stamp it
//! - creates a `request` span carrying id, method, and path, so logs inside
//!   handlers inherit those fields
//! - sets the `x-request-id` response header
//! - emits one structured `request_completed` event with status and timing

use std::rc::Rc;
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::trace_ctx;

#[derive(Clone, Default)]
pub struct RequestContext;

impl<S, B> Transform<S, ServiceRequest> for RequestContext
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestContextMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestContextMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequestContextMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequestContextMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let request_id = Uuid::new_v4().to_string();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let start = Instant::now();

        req.extensions_mut().insert(request_id.clone());

        let span = info_span!(
            "request",
            request_id = %request_id,
            method = %method,
            path = %path
        );

        let fut = self.service.call(req);

        Box::pin(
            trace_ctx::with_request_id(request_id.clone(), async move {
                let result = fut.await;

                let status = match &result {
                    Ok(res) => res.status(),
                    Err(err) => err.as_response_error().status_code(),
                };
                let duration_us = start.elapsed().as_micros() as u64;
                let status_code = status.as_u16();

                if status.is_server_error() {
                    error!(http.status_code = %status_code, duration_us = %duration_us, message = "request_completed");
                } else if status.is_client_error() {
                    warn!(http.status_code = %status_code, duration_us = %duration_us, message = "request_completed");
                } else {
                    info!(http.status_code = %status_code, duration_us = %duration_us, message = "request_completed");
                }

                result.map(|mut res| {
                    res.headers_mut().insert(
                        header::HeaderName::from_static("x-request-id"),
                        header::HeaderValue::from_str(&request_id)
                            .unwrap_or_else(|_| header::HeaderValue::from_static("invalid-uuid")),
                    );
                    res
                })
            })
            .instrument(span),
        )
    }
}
