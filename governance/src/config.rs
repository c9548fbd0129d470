//! Configuration management for the access governance server.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Values that fail to parse fall back to their default.

use crate::auth::AuthConfig;
use crate::environment::ApprovalPolicy;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// HTTP listener configuration
    pub server: ServerConfig,
    /// Store and approval rules
    pub store: StoreConfig,
    /// Mock login credentials
    pub auth: AuthConfig,
    /// Install the Prometheus recorder and serve `/metrics`
    pub metrics_enabled: bool,
}

/// HTTP listener configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout: u64,
    /// How long a handler waits for a command outcome, in milliseconds
    pub request_timeout_ms: u64,
    /// Single allowed CORS origin; any origin when unset
    pub cors_allowed_origin: Option<String>,
}

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Capacity of the outcome broadcast channel
    pub broadcast_capacity: usize,
    /// Start with the demo records instead of an empty store
    pub seed_demo_data: bool,
    /// How decided requests react to approve and reject
    pub approval_policy: ApprovalPolicy,
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    let value = raw.trim().parse().ok();
    if value.is_none() {
        tracing::warn!(key, value = %raw, "Ignoring unparsable setting, using default");
    }
    value
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let auth_defaults = AuthConfig::default();

        Self {
            server: ServerConfig {
                host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parsed(&lookup, "PORT").unwrap_or(5000),
                shutdown_timeout: parsed(&lookup, "SHUTDOWN_TIMEOUT").unwrap_or(30),
                request_timeout_ms: parsed(&lookup, "REQUEST_TIMEOUT_MS").unwrap_or(5_000),
                cors_allowed_origin: lookup("CORS_ALLOWED_ORIGIN").filter(|s| !s.is_empty()),
            },
            store: StoreConfig {
                broadcast_capacity: parsed(&lookup, "BROADCAST_CAPACITY").unwrap_or(256),
                seed_demo_data: parsed(&lookup, "SEED_DEMO_DATA").unwrap_or(true),
                approval_policy: parsed(&lookup, "APPROVAL_POLICY").unwrap_or_default(),
            },
            auth: AuthConfig {
                shared_password: lookup("AUTH_SHARED_PASSWORD")
                    .unwrap_or(auth_defaults.shared_password),
                otp_code: lookup("AUTH_OTP_CODE").unwrap_or(auth_defaults.otp_code),
                require_otp: parsed(&lookup, "AUTH_REQUIRE_OTP").unwrap_or(auth_defaults.require_otp),
            },
            metrics_enabled: parsed(&lookup, "METRICS_ENABLED").unwrap_or(true),
        }
    }

    /// `host:port` to bind.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Handler wait for a command outcome.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.server.request_timeout_ms)
    }

    /// Grace period for in-flight effects on shutdown.
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.server.shutdown_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.store.approval_policy, ApprovalPolicy::Legacy);
        assert!(config.store.seed_demo_data);
        assert!(config.auth.require_otp);
        assert_eq!(config.auth.shared_password, "password123");
        assert!(config.server.cors_allowed_origin.is_none());
    }

    #[test]
    fn overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("APPROVAL_POLICY", "strict"),
            ("SEED_DEMO_DATA", "false"),
            ("AUTH_REQUIRE_OTP", "false"),
            ("AUTH_OTP_CODE", "999999"),
            ("CORS_ALLOWED_ORIGIN", "http://localhost:5173"),
        ]);

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.store.approval_policy, ApprovalPolicy::Strict);
        assert!(!config.store.seed_demo_data);
        assert!(!config.auth.require_otp);
        assert_eq!(config.auth.otp_code, "999999");
        assert_eq!(
            config.server.cors_allowed_origin.as_deref(),
            Some("http://localhost:5173")
        );
    }

    #[test]
    fn unparsable_values_fall_back() {
        let config = config_from(&[("PORT", "eighty"), ("APPROVAL_POLICY", "lenient")]);
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.store.approval_policy, ApprovalPolicy::Legacy);
    }
}
