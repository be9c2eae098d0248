pub mod bearer;
pub mod cors;
pub mod request_context;

pub use bearer::RequireBearer;
pub use cors::cors_middleware;
pub use request_context::RequestContext;
