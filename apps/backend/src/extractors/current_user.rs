use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::auth::AccessClaims;
use crate::error::AppError;

/// The verified caller, read from the claims the bearer middleware stored in
/// request extensions. Handlers taking this parameter can only be reached
/// through a protected scope; a missing claim set is still a 401 rather than
/// a panic.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub sub: String,
    pub username: Option<String>,
}

impl From<&AccessClaims> for CurrentUser {
    fn from(claims: &AccessClaims) -> Self {
        Self {
            sub: claims.sub.clone(),
            username: claims.preferred_username.clone(),
        }
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AccessClaims>()
                .map(CurrentUser::from)
                .ok_or_else(AppError::unauthorized),
        )
    }
}
