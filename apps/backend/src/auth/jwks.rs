//! JWKS client: fetches the identity provider's published signing keys,
//! caches them by key id, and rate-limits outbound fetches.
//!
//! The cache is refreshed at most once at a time (concurrent misses wait on
//! the refresh lock and re-check), and at most `requests_per_minute` times
//! per minute in total, so a flood of unknown-kid tokens cannot be used to
//! hammer the identity provider.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use jsonwebtoken::jwk::{AlgorithmParameters, JwkSet};
use jsonwebtoken::DecodingKey;
use parking_lot::Mutex;
use tracing::debug;

use crate::error::AppError;

/// Keycloak-style JWKS path relative to the issuer URL.
const JWKS_PATH: &str = "/protocol/openid-connect/certs";

/// Derive the JWKS endpoint from the issuer URL.
pub fn jwks_url_for_issuer(issuer: &str) -> String {
    format!("{}{}", issuer.trim_end_matches('/'), JWKS_PATH)
}

struct RemoteJwks {
    url: String,
    http: reqwest::Client,
    limiter: FetchLimiter,
}

pub struct JwksClient {
    /// Resolved RSA keys by key id.
    keys: DashMap<String, Arc<DecodingKey>>,
    /// Serialises refreshes so concurrent misses produce one upstream request.
    refresh_lock: tokio::sync::Mutex<()>,
    /// Absent when the client was seeded with a static key set.
    remote: Option<RemoteJwks>,
}

impl JwksClient {
    /// Client for the given issuer's published key set.
    pub fn for_issuer(
        issuer: &str,
        requests_per_minute: u32,
        fetch_timeout: Duration,
    ) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(fetch_timeout)
            .build()
            .map_err(|e| AppError::config(format!("failed to build JWKS HTTP client: {e}")))?;

        Ok(Self {
            keys: DashMap::new(),
            refresh_lock: tokio::sync::Mutex::new(()),
            remote: Some(RemoteJwks {
                url: jwks_url_for_issuer(issuer),
                http,
                limiter: FetchLimiter::per_minute(requests_per_minute),
            }),
        })
    }

    /// Client seeded with a static key set; never touches the network.
    /// A key id that is not in the set fails resolution outright.
    pub fn from_static(jwks: &JwkSet) -> Self {
        let client = Self {
            keys: DashMap::new(),
            refresh_lock: tokio::sync::Mutex::new(()),
            remote: None,
        };
        client.absorb(jwks);
        client
    }

    /// Resolve a decoding key by key id, refreshing the cache on a miss.
    pub async fn decoding_key(&self, kid: &str) -> Result<Arc<DecodingKey>, AppError> {
        if let Some(key) = self.keys.get(kid) {
            return Ok(key.value().clone());
        }

        let remote = match &self.remote {
            Some(remote) => remote,
            None => {
                debug!(kid, "unknown key id and no JWKS endpoint configured");
                return Err(AppError::unauthorized());
            }
        };

        let _guard = self.refresh_lock.lock().await;

        // A concurrent request may have refreshed while we waited.
        if let Some(key) = self.keys.get(kid) {
            return Ok(key.value().clone());
        }

        if !remote.limiter.try_acquire() {
            return Err(AppError::upstream("JWKS fetch budget exhausted"));
        }

        let jwks = remote
            .http
            .get(&remote.url)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("JWKS fetch failed: {e}")))?
            .error_for_status()
            .map_err(|e| AppError::upstream(format!("JWKS fetch failed: {e}")))?
            .json::<JwkSet>()
            .await
            .map_err(|e| AppError::upstream(format!("JWKS response is not a key set: {e}")))?;

        let absorbed = self.absorb(&jwks);
        debug!(count = absorbed, url = %remote.url, "refreshed JWKS cache");

        match self.keys.get(kid) {
            Some(key) => Ok(key.value().clone()),
            None => {
                debug!(kid, "key id not present in refreshed key set");
                Err(AppError::unauthorized())
            }
        }
    }

    /// Cache every usable RSA key from the set. Returns how many were kept.
    fn absorb(&self, jwks: &JwkSet) -> usize {
        let mut absorbed = 0;
        for jwk in &jwks.keys {
            let kid = match &jwk.common.key_id {
                Some(kid) => kid.clone(),
                None => continue,
            };
            // RS256 is the only accepted algorithm; skip EC/OKP/symmetric keys.
            if !matches!(jwk.algorithm, AlgorithmParameters::RSA(_)) {
                continue;
            }
            match DecodingKey::from_jwk(jwk) {
                Ok(key) => {
                    self.keys.insert(kid, Arc::new(key));
                    absorbed += 1;
                }
                Err(e) => debug!(kid = %kid, error = %e, "skipping unusable JWK"),
            }
        }
        absorbed
    }
}

/// Sliding-window limiter for outbound key fetches. A budget of 0 disables
/// fetching entirely.
struct FetchLimiter {
    max_per_window: u32,
    window: Duration,
    recent: Mutex<VecDeque<Instant>>,
}

impl FetchLimiter {
    fn per_minute(max: u32) -> Self {
        Self::new(max, Duration::from_secs(60))
    }

    fn new(max_per_window: u32, window: Duration) -> Self {
        Self {
            max_per_window,
            window,
            recent: Mutex::new(VecDeque::new()),
        }
    }

    fn try_acquire(&self) -> bool {
        let now = Instant::now();
        let mut recent = self.recent.lock();
        while recent
            .front()
            .map_or(false, |t| now.duration_since(*t) >= self.window)
        {
            recent.pop_front();
        }
        if (recent.len() as u32) < self.max_per_window {
            recent.push_back(now);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::keys::{test_jwk_set, TEST_KID};

    #[test]
    fn jwks_url_is_derived_from_issuer() {
        assert_eq!(
            jwks_url_for_issuer("http://localhost:8081/realms/notes"),
            "http://localhost:8081/realms/notes/protocol/openid-connect/certs"
        );
        // Trailing slash must not double up.
        assert_eq!(
            jwks_url_for_issuer("http://localhost:8081/realms/notes/"),
            "http://localhost:8081/realms/notes/protocol/openid-connect/certs"
        );
    }

    #[test]
    fn limiter_denies_after_budget() {
        let limiter = FetchLimiter::per_minute(2);
        assert!(limiter.try_acquire());
        assert!(limiter.try_acquire());
        assert!(!limiter.try_acquire());
    }

    #[test]
    fn limiter_recovers_after_window() {
        let limiter = FetchLimiter::new(1, Duration::from_millis(30));
        assert!(limiter.try_acquire());
        assert!(!limiter.try_acquire());
        std::thread::sleep(Duration::from_millis(40));
        assert!(limiter.try_acquire());
    }

    #[test]
    fn zero_budget_disables_fetching() {
        let limiter = FetchLimiter::per_minute(0);
        assert!(!limiter.try_acquire());
    }

    #[tokio::test]
    async fn static_client_resolves_known_kid() {
        let client = JwksClient::from_static(&test_jwk_set());
        assert!(client.decoding_key(TEST_KID).await.is_ok());
    }

    #[tokio::test]
    async fn static_client_rejects_unknown_kid() {
        let client = JwksClient::from_static(&test_jwk_set());
        let err = client.decoding_key("nope").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }
}
