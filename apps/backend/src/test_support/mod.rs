//! Shared fixtures for unit and integration tests: a static RSA keypair and
//! key set, a token mint, and a test service builder. Nothing here touches
//! the network.

pub mod app;
pub mod keys;
pub mod tokens;

pub use app::{test_app, test_state};
pub use tokens::{TokenMint, TEST_ISSUER};
