//! Verified access-token claims, inserted into request extensions by the
//! bearer middleware.

use serde::{Deserialize, Serialize};

/// The subset of identity-provider claims this service cares about. Unknown
/// claims are ignored on decode. Lifetime: one request.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AccessClaims {
    /// Stable user identifier; the key into the notes store.
    pub sub: String,
    pub iss: String,
    /// Expiry (seconds since epoch)
    pub exp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_username: Option<String>,
}
