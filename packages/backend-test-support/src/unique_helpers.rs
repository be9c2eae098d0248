//! Helpers for generating unique test data, so tests cannot observe each
//! other's state even when they share a store.

use ulid::Ulid;

/// A unique string in the format `{prefix}-{ulid}`.
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// A unique subject identifier, shaped like the identity provider's `sub`.
pub fn unique_sub() -> String {
    unique_str("user")
}
