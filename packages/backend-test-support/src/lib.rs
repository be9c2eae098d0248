//! Backend test support utilities
//!
//! Helpers shared by unit and integration tests: logging initialisation,
//! assertions for the stable JSON error contract, and unique test data.

pub mod error_contract;
pub mod logging;
pub mod unique_helpers;
