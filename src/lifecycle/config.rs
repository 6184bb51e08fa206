//! Dashboard configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `ADMIN_BACKEND` - `local` in-memory catalog or `http` remote API (default: local)
//! - `ADMIN_API_URL` - Base URL of the remote admin API (default: http://localhost:3000)
//! - `ADMIN_REQUEST_TIMEOUT_MS` - Per-request timeout (default: 10000)
//! - `ADMIN_SUCCESS_CRITERION` - `exact-200` or `any-2xx` (default: exact-200)
//! - `ADMIN_INTEGRITY_POLICY` - `structured` or `presumed` (default: structured)
//! - `ADMIN_CURRENCY` - `USD`, `EUR` or `GBP` (default: USD)

use crate::listing::Currency;
use crate::orchestrator::IntegrityPolicy;
use crate::transport::SuccessCriterion;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    #[default]
    Local,
    Http,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdminConfig {
    pub backend: Backend,
    pub api_url: String,
    pub request_timeout: Duration,
    pub success: SuccessCriterion,
    pub integrity: IntegrityPolicy,
    pub currency: Currency,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            success: SuccessCriterion::default(),
            integrity: IntegrityPolicy::default(),
            currency: Currency::default(),
        }
    }
}

impl AdminConfig {
    /// Load configuration from the process environment.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup` instead of the environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let backend = match get("ADMIN_BACKEND").as_deref().map(str::trim) {
            None | Some("local") => Backend::Local,
            Some("http") => Backend::Http,
            Some(other) => return Err(invalid("ADMIN_BACKEND", other)),
        };

        let request_timeout = match get("ADMIN_REQUEST_TIMEOUT_MS") {
            None => Duration::from_millis(DEFAULT_TIMEOUT_MS),
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_REQUEST_TIMEOUT_MS".into(), e.to_string()))?,
        };

        let success = match get("ADMIN_SUCCESS_CRITERION").as_deref().map(str::trim) {
            None | Some("exact-200") => SuccessCriterion::ExactOk,
            Some("any-2xx") => SuccessCriterion::AnySuccess,
            Some(other) => return Err(invalid("ADMIN_SUCCESS_CRITERION", other)),
        };

        let integrity = match get("ADMIN_INTEGRITY_POLICY").as_deref().map(str::trim) {
            None | Some("structured") => IntegrityPolicy::Structured,
            Some("presumed") => IntegrityPolicy::Presumed,
            Some(other) => return Err(invalid("ADMIN_INTEGRITY_POLICY", other)),
        };

        let currency = match get("ADMIN_CURRENCY") {
            None => Currency::default(),
            Some(code) => code
                .parse()
                .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_CURRENCY".into(), e))?,
        };

        Ok(Self {
            backend,
            api_url: get("ADMIN_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            request_timeout,
            success,
            integrity,
            currency,
        })
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), format!("unrecognized value {value:?}"))
}
