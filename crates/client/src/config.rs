//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SAFFRON_API_URL` - Base URL of the Saffron REST API
//!   (default: `http://localhost:8080/api`)
//! - `SAFFRON_API_TIMEOUT_SECS` - Client-side request timeout (default: 15)
//! - `SAFFRON_STATE_DIR` - Directory for persisted client state (session,
//!   wishlist); state is kept in memory only when unset
//! - `SAFFRON_RAZORPAY_KEY_ID` - Public Razorpay key id handed to the
//!   payment widget (not a secret)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:8080/api";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Saffron client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST API, including any path prefix.
    pub api_url: Url,
    /// Fixed client-side timeout applied to every request.
    pub timeout: Duration,
    /// Directory for persisted client state; `None` keeps state in memory.
    pub state_dir: Option<PathBuf>,
    /// Public Razorpay key id for the payment widget.
    pub razorpay_key_id: Option<String>,
}

impl ClientConfig {
    /// Create a configuration pointing at the given API base URL, with
    /// defaults for everything else.
    #[must_use]
    pub const fn new(api_url: Url) -> Self {
        Self {
            api_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            state_dir: None,
            razorpay_key_id: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = get_env_or_default("SAFFRON_API_URL", DEFAULT_API_URL)
            .parse::<Url>()
            .map_err(|e| ConfigError::InvalidEnvVar("SAFFRON_API_URL".to_string(), e.to_string()))?;

        let timeout_secs = get_env_or_default(
            "SAFFRON_API_TIMEOUT_SECS",
            &DEFAULT_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("SAFFRON_API_TIMEOUT_SECS".to_string(), e.to_string())
        })?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "SAFFRON_API_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        let state_dir = get_optional_env("SAFFRON_STATE_DIR").map(PathBuf::from);
        let razorpay_key_id = get_optional_env("SAFFRON_RAZORPAY_KEY_ID");

        Ok(Self {
            api_url,
            timeout: Duration::from_secs(timeout_secs),
            state_dir,
            razorpay_key_id,
        })
    }

    /// Override the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the state directory.
    #[must_use]
    pub fn with_state_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.state_dir = Some(dir.into());
        self
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_applies_defaults() {
        let config = ClientConfig::new("http://localhost:9999/api".parse().unwrap());
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert!(config.state_dir.is_none());
        assert!(config.razorpay_key_id.is_none());
    }

    #[test]
    fn test_builders() {
        let config = ClientConfig::new("http://localhost:9999/api".parse().unwrap())
            .with_timeout(Duration::from_secs(2))
            .with_state_dir("/tmp/saffron");
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert_eq!(config.state_dir, Some(PathBuf::from("/tmp/saffron")));
    }
}
