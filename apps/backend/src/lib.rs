#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod store;
pub mod test_support;
pub mod trace_ctx;

// Re-exports for public API
pub use auth::{AccessClaims, JwksClient, TokenVerifier};
pub use config::AppConfig;
pub use error::AppError;
pub use extractors::{CurrentUser, JsonBody};
pub use middleware::{cors_middleware, RequestContext, RequireBearer};
pub use state::AppState;
pub use store::{Note, NoteStore};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
