//! Test service builder: the production route tree and middleware over a
//! verifier seeded with the static test key set.

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};

use crate::auth::TokenVerifier;
use crate::middleware::RequestContext;
use crate::routes;
use crate::state::AppState;
use crate::test_support::keys::test_jwk_set;
use crate::test_support::tokens::TEST_ISSUER;

/// Fresh state with an empty note store and an offline verifier.
pub fn test_state() -> AppState {
    AppState::new(TokenVerifier::with_static_keys(TEST_ISSUER, &test_jwk_set()))
}

/// Build and initialise the Actix test service with the production routes.
///
/// Return type is `impl Service<...>` so callers don't have to name the
/// opaque service type.
pub async fn test_app(
    state: AppState,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    test::init_service(
        App::new()
            .wrap(RequestContext)
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await
}
