//! Process configuration, read once at startup.
//!
//! Environment variables must be set by the runtime environment (compose
//! env_file, `docker run --env-file`, or sourcing an env file manually).

use std::env;
use std::time::Duration;

use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_JWKS_REQUESTS_PER_MINUTE: u32 = 10;
const DEFAULT_JWKS_FETCH_TIMEOUT_SECS: u64 = 3;

/// Immutable application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// OIDC issuer URL, e.g. `http://localhost:8081/realms/notes`. The JWKS
    /// endpoint is derived from it; the `iss` claim must match it exactly.
    pub issuer: String,
    pub cors_allowed_origins: Vec<String>,
    /// Cap on outbound JWKS fetches, so a flood of unknown-kid tokens cannot
    /// be used to hammer the identity provider.
    pub jwks_requests_per_minute: u32,
    pub jwks_fetch_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());

        let port = match env::var("BACKEND_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| AppError::config(format!("BACKEND_PORT is not a valid port: {raw}")))?,
            Err(_) => DEFAULT_PORT,
        };

        let issuer = env::var("OIDC_ISSUER")
            .map_err(|_| AppError::config("OIDC_ISSUER must be set"))?
            .trim_end_matches('/')
            .to_string();
        if issuer.is_empty() {
            return Err(AppError::config("OIDC_ISSUER must not be empty"));
        }

        let cors_allowed_origins = parse_origins(
            &env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000,http://localhost:3005".to_string()),
        );

        let jwks_requests_per_minute = match env::var("JWKS_REQUESTS_PER_MINUTE") {
            Ok(raw) => raw.parse::<u32>().map_err(|_| {
                AppError::config(format!("JWKS_REQUESTS_PER_MINUTE is not a number: {raw}"))
            })?,
            Err(_) => DEFAULT_JWKS_REQUESTS_PER_MINUTE,
        };

        let jwks_fetch_timeout = match env::var("JWKS_FETCH_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(raw.parse::<u64>().map_err(|_| {
                AppError::config(format!("JWKS_FETCH_TIMEOUT_SECS is not a number: {raw}"))
            })?),
            Err(_) => Duration::from_secs(DEFAULT_JWKS_FETCH_TIMEOUT_SECS),
        };

        Ok(Self {
            host,
            port,
            issuer,
            cors_allowed_origins,
            jwks_requests_per_minute,
            jwks_fetch_timeout,
        })
    }
}

/// Parse a comma-separated origin list, ignoring empty entries and anything
/// that is not an http(s) URL.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(|s| s.to_string())
        .collect()
}
