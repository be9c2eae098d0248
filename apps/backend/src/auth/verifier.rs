//! Access-token verification against the identity provider's signing keys.

use std::time::Duration;

use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{decode, decode_header, Algorithm, Validation};
use tracing::debug;

use crate::auth::claims::AccessClaims;
use crate::auth::jwks::JwksClient;
use crate::config::AppConfig;
use crate::error::AppError;

/// Verifies bearer tokens: RS256 only, signature against a JWKS-resolved
/// key, exact issuer match, expiry. Every failure collapses to the same
/// client-facing authentication error; the specific cause is only logged.
pub struct TokenVerifier {
    issuer: String,
    jwks: JwksClient,
}

impl TokenVerifier {
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        Ok(Self {
            issuer: config.issuer.clone(),
            jwks: JwksClient::for_issuer(
                &config.issuer,
                config.jwks_requests_per_minute,
                config.jwks_fetch_timeout,
            )?,
        })
    }

    /// Verifier over a fixed key set; no network. For tests.
    pub fn with_static_keys(issuer: &str, jwks: &JwkSet) -> Self {
        Self {
            issuer: issuer.trim_end_matches('/').to_string(),
            jwks: JwksClient::from_static(jwks),
        }
    }

    /// Verifier with a custom fetch budget, for wiring beyond `AppConfig`.
    pub fn new(
        issuer: &str,
        requests_per_minute: u32,
        fetch_timeout: Duration,
    ) -> Result<Self, AppError> {
        Ok(Self {
            issuer: issuer.trim_end_matches('/').to_string(),
            jwks: JwksClient::for_issuer(issuer, requests_per_minute, fetch_timeout)?,
        })
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub async fn verify(&self, token: &str) -> Result<AccessClaims, AppError> {
        let header = decode_header(token).map_err(|e| {
            debug!(error = %e, "token header did not decode");
            AppError::unauthorized()
        })?;

        if header.alg != Algorithm::RS256 {
            debug!(alg = ?header.alg, "token signed with a disallowed algorithm");
            return Err(AppError::unauthorized());
        }

        let kid = header.kid.ok_or_else(|| {
            debug!("token header has no kid");
            AppError::unauthorized()
        })?;

        let key = self.jwks.decoding_key(&kid).await?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[&self.issuer]);
        // The original deployment does not pin an audience; Keycloak access
        // tokens carry `aud: account`, which must not fail validation.
        validation.validate_aud = false;

        decode::<AccessClaims>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(kind = ?e.kind(), "token validation failed");
                AppError::unauthorized()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::keys::test_jwk_set;
    use crate::test_support::tokens::{TokenMint, TEST_ISSUER};

    fn verifier() -> TokenVerifier {
        TokenVerifier::with_static_keys(TEST_ISSUER, &test_jwk_set())
    }

    #[tokio::test]
    async fn accepts_valid_token() {
        let token = TokenMint::for_subject("alice").token();
        let claims = verifier().verify(&token).await.unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.iss, TEST_ISSUER);
    }

    #[tokio::test]
    async fn rejects_expired_token() {
        let token = TokenMint::for_subject("alice").expired().token();
        assert!(verifier().verify(&token).await.is_err());
    }

    #[tokio::test]
    async fn rejects_wrong_issuer() {
        let token = TokenMint::for_subject("alice")
            .issuer("http://evil.example/realms/notes")
            .token();
        assert!(verifier().verify(&token).await.is_err());
    }

    #[tokio::test]
    async fn rejects_unknown_kid() {
        let token = TokenMint::for_subject("alice").kid("other-key").token();
        assert!(verifier().verify(&token).await.is_err());
    }

    #[tokio::test]
    async fn rejects_wrong_signing_key() {
        let token = TokenMint::for_subject("alice").wrong_key().token();
        assert!(verifier().verify(&token).await.is_err());
    }

    #[tokio::test]
    async fn rejects_hs256_token() {
        // Algorithm confusion: HS256 with public material as the secret must
        // fail before key resolution is even attempted.
        let token = TokenMint::for_subject("alice").hs256();
        assert!(verifier().verify(&token).await.is_err());
    }

    #[tokio::test]
    async fn rejects_garbage() {
        assert!(verifier().verify("not-a-jwt").await.is_err());
    }
}
