//! Bearer-token middleware for protected scopes.
//!
//! Runs before any handler in the scope it wraps: extracts the bearer token
//! from the `Authorization` header, verifies it, and stores the verified
//! claims in request extensions. Any failure short-circuits the request with
//! the generic authentication error; handlers never see an unauthenticated
//! request.

use std::rc::Rc;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::error::AppError;
use crate::state::AppState;

pub struct RequireBearer;

impl<S, B> Transform<S, ServiceRequest> for RequireBearer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireBearerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireBearerMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireBearerMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireBearerMiddleware<S>
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
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let token = bearer_token(req.headers().get(header::AUTHORIZATION))?;

            let state = req
                .app_data::<web::Data<AppState>>()
                .cloned()
                .ok_or_else(|| AppError::internal("AppState not available"))?;

            let claims = state.verifier().verify(&token).await?;

            // Store claims before calling the service so extractors see them.
            req.extensions_mut().insert(claims);

            service.call(req).await
        })
    }
}

/// Parse `Authorization: Bearer <token>`. Exactly two whitespace-separated
/// parts, a `Bearer` scheme, and a non-empty token; anything else is an
/// authentication failure.
fn bearer_token(header_value: Option<&header::HeaderValue>) -> Result<String, AppError> {
    let value = header_value.ok_or_else(AppError::unauthorized)?;
    let value = value.to_str().map_err(|_| AppError::unauthorized())?;

    let parts: Vec<&str> = value.split_whitespace().collect();
    if parts.len() != 2 || parts[0] != "Bearer" || parts[1].is_empty() {
        return Err(AppError::unauthorized());
    }

    Ok(parts[1].to_string())
}

#[cfg(test)]
mod tests {
    use actix_web::http::header::HeaderValue;

    use super::*;

    fn parse(raw: &str) -> Result<String, AppError> {
        let value = HeaderValue::from_str(raw).unwrap();
        bearer_token(Some(&value))
    }

    #[test]
    fn accepts_well_formed_header() {
        assert_eq!(parse("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
    }

    #[test]
    fn rejects_missing_header() {
        assert!(bearer_token(None).is_err());
    }

    #[test]
    fn rejects_wrong_scheme() {
        assert!(parse("Token abc").is_err());
        assert!(parse("bearer abc").is_err());
    }

    #[test]
    fn rejects_empty_token() {
        assert!(parse("Bearer").is_err());
        assert!(parse("Bearer ").is_err());
    }

    #[test]
    fn rejects_extra_parts() {
        assert!(parse("Bearer one two").is_err());
    }
}
