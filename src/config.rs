//! Gateway client configuration.
//!
//! This module defines the configuration consumed by the transport layer and
//! the payment client. A configuration is built once, validated, and then
//! shared read-only; nothing in this crate mutates it after construction.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::{Error, Result};

/// Environment variable names read by [`GatewayConfig::from_env`].
const ENV_BASE_URL: &str = "BFS_BASE_URL";
const ENV_KEY_PATH: &str = "BFS_KEY_PATH";
const ENV_BENEFICIARY_ID: &str = "BFS_BENEFICIARY_ID";
const ENV_PAYMENT_DESC: &str = "BFS_PAYMENT_DESC";
const ENV_TIMEOUT_SECS: &str = "BFS_TIMEOUT_SECS";
const ENV_CONNECT_TIMEOUT_SECS: &str = "BFS_CONNECT_TIMEOUT_SECS";

/// Client configuration for the BFS gateway.
///
/// All four string fields are required and must be non-empty for the
/// configuration to be usable; [`validate`](Self::validate) reports every
/// missing field at once. The timeouts default to 30s total and 10s for
/// connection establishment.
///
/// # Examples
///
/// ```
/// use bfs_gateway::GatewayConfig;
///
/// let config = GatewayConfig {
///     base_url: "https://gateway.example.bt".to_owned(),
///     key_path: "/etc/bfs/merchant.pem".to_owned(),
///     beneficiary_id: "BE10000001".to_owned(),
///     payment_description: "Utility payment".to_owned(),
///     ..Default::default()
/// };
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Base URL of the gateway. Must use HTTPS and must not point at
    /// localhost or a loopback address.
    #[serde(default)]
    pub base_url: String,

    /// Path or handle of the merchant's RSA private signing key. Opaque to
    /// this crate; it is held for collaborators that perform signing.
    #[serde(default)]
    pub key_path: String,

    /// Beneficiary identifier issued by the gateway operator.
    #[serde(default)]
    pub beneficiary_id: String,

    /// Default description sent with Authorization requests.
    #[serde(default)]
    pub payment_description: String,

    /// Total request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            key_path: String::new(),
            beneficiary_id: String::new(),
            payment_description: String::new(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl GatewayConfig {
    /// Loads configuration from the process environment.
    ///
    /// Reads `BFS_BASE_URL`, `BFS_KEY_PATH`, `BFS_BENEFICIARY_ID`,
    /// `BFS_PAYMENT_DESC`, and optionally `BFS_TIMEOUT_SECS` /
    /// `BFS_CONNECT_TIMEOUT_SECS`. Unset variables leave the field empty (or
    /// at its default for the timeouts); call [`validate`](Self::validate)
    /// afterwards to surface what is missing.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|name| std::env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// [`from_env`](Self::from_env) is this with [`std::env::var`]; tests
    /// supply a closure over a map instead of mutating process state.
    pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parse_secs =
            |name: &str, fallback: u64| lookup(name).and_then(|v| v.parse().ok()).unwrap_or(fallback);

        Self {
            base_url: lookup(ENV_BASE_URL).unwrap_or_default(),
            key_path: lookup(ENV_KEY_PATH).unwrap_or_default(),
            beneficiary_id: lookup(ENV_BENEFICIARY_ID).unwrap_or_default(),
            payment_description: lookup(ENV_PAYMENT_DESC).unwrap_or_default(),
            timeout_secs: parse_secs(ENV_TIMEOUT_SECS, default_timeout_secs()),
            connect_timeout_secs: parse_secs(
                ENV_CONNECT_TIMEOUT_SECS,
                default_connect_timeout_secs(),
            ),
        }
    }

    /// Lists every required field that is empty.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.base_url.trim().is_empty() {
            missing.push("base_url");
        }
        if self.key_path.trim().is_empty() {
            missing.push("key_path");
        }
        if self.beneficiary_id.trim().is_empty() {
            missing.push("beneficiary_id");
        }
        if self.payment_description.trim().is_empty() {
            missing.push("payment_description");
        }
        missing
    }

    /// Returns true when every required field is present.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.missing_fields().is_empty() && self.validate_base_url().is_ok()
    }

    /// Validates the configuration, naming every missing required field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] listing the missing fields, or describing
    /// why the base URL is unacceptable (non-HTTPS scheme, localhost or
    /// loopback host, unparseable URL).
    pub fn validate(&self) -> Result<()> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(Error::Config {
                detail: format!("missing required fields: {}", missing.join(", ")),
                missing,
            });
        }
        self.validate_base_url()
    }

    /// Checks the base URL against the transport security policy.
    fn validate_base_url(&self) -> Result<()> {
        let url = Url::parse(&self.base_url).map_err(|e| Error::Config {
            detail: format!("invalid base_url '{}': {e}", self.base_url),
            missing: Vec::new(),
        })?;

        if url.scheme() != "https" {
            return Err(Error::Config {
                detail: format!("base_url must use HTTPS, got: {}", url.scheme()),
                missing: Vec::new(),
            });
        }

        if let Some(host) = url.host_str() {
            let host = host.to_lowercase();
            if host == "localhost" || host.starts_with("127.") || host == "::1" || host == "[::1]" {
                return Err(Error::Config {
                    detail: format!("base_url must not be localhost or loopback: {host}"),
                    missing: Vec::new(),
                });
            }
        }

        Ok(())
    }

    /// Returns the total request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the connection timeout as a [`Duration`].
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}
