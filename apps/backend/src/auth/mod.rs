pub mod claims;
pub mod jwks;
pub mod verifier;

pub use claims::AccessClaims;
pub use jwks::JwksClient;
pub use verifier::TokenVerifier;
