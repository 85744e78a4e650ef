//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.
//! Database credentials are deliberately absent: they come from a
//! [`SecretSource`](crate::config::secrets::SecretSource) at startup.

use serde::{Deserialize, Serialize};

/// Root configuration for the server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SiteConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Auth gate settings.
    pub auth: AuthConfig,

    /// Remote database settings (non-secret part).
    pub database: DatabaseSettings,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:4321").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:4321".to_string(),
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Where the per-request identity comes from.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum IdentitySource {
    /// Trusted header set by the identity provider's edge.
    #[default]
    Header,
    /// Built-in mock user session, for layout work.
    Fixture,
    /// Every request is signed out.
    Anonymous,
}

/// Auth gate configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Identity lookup used by the gate.
    pub identity_source: IdentitySource,

    /// Header carrying the signed-in user id when `identity_source = "header"`.
    pub user_id_header: String,

    /// Path prefixes a signed-in user is bounced away from.
    pub guarded_prefixes: Vec<String>,

    /// Where signed-in users are sent instead.
    pub signed_in_redirect: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            identity_source: IdentitySource::Header,
            user_id_header: "x-user-id".to_string(),
            guarded_prefixes: vec!["/sign-in".to_string(), "/sign-up".to_string()],
            signed_in_redirect: "/profile".to_string(),
        }
    }
}

/// Remote database settings. Credentials are looked up by secret name.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Secret holding the database URL.
    pub url_secret: String,

    /// Secret holding the database auth token.
    pub token_secret: String,

    /// Table shown on the database status page.
    pub table: String,

    /// Deadline for the single fetch attempt, in milliseconds.
    pub query_timeout_ms: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url_secret: "DATABASE_URL".to_string(),
            token_secret: "DATABASE_TOKEN".to_string(),
            table: "test_table".to_string(),
            query_timeout_ms: 5_000,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:4321");
        assert_eq!(config.auth.signed_in_redirect, "/profile");
        assert_eq!(config.auth.guarded_prefixes, vec!["/sign-in", "/sign-up"]);
        assert_eq!(config.database.query_timeout_ms, 5_000);
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_partial_sections() {
        let config: SiteConfig = toml::from_str(
            r#"
            [auth]
            identity_source = "fixture"

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.auth.identity_source, IdentitySource::Fixture);
        assert_eq!(config.auth.user_id_header, "x-user-id");
        assert_eq!(config.observability.log_format, LogFormat::Json);
    }
}
