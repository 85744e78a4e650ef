//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Detect auth settings that would loop a signed-in user forever
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SiteConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::SiteConfig;

/// A single semantic problem in a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    InvalidBindAddress(String),

    #[error("observability.metrics_address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("database.query_timeout_ms must be greater than zero")]
    ZeroQueryTimeout,

    #[error("database.table '{0}' is not a plain identifier")]
    InvalidTableName(String),

    #[error("auth.signed_in_redirect '{0}' must start with '/'")]
    RelativeRedirect(String),

    #[error("auth.guarded_prefixes entry '{0}' must be non-empty and start with '/'")]
    InvalidGuardedPrefix(String),

    #[error("auth.signed_in_redirect '{0}' is itself guarded and would loop")]
    RedirectLoop(String),

    #[error("auth.user_id_header '{0}' is not a valid header name")]
    InvalidHeaderName(String),
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &SiteConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if config.database.query_timeout_ms == 0 {
        errors.push(ValidationError::ZeroQueryTimeout);
    }

    if !is_identifier(&config.database.table) {
        errors.push(ValidationError::InvalidTableName(config.database.table.clone()));
    }

    let auth = &config.auth;
    if axum::http::HeaderName::from_bytes(auth.user_id_header.as_bytes()).is_err() {
        errors.push(ValidationError::InvalidHeaderName(auth.user_id_header.clone()));
    }

    if !auth.signed_in_redirect.starts_with('/') {
        errors.push(ValidationError::RelativeRedirect(auth.signed_in_redirect.clone()));
    }

    for prefix in &auth.guarded_prefixes {
        if !prefix.starts_with('/') {
            errors.push(ValidationError::InvalidGuardedPrefix(prefix.clone()));
        }
    }

    if auth
        .guarded_prefixes
        .iter()
        .any(|p| p.starts_with('/') && auth.signed_in_redirect.starts_with(p.as_str()))
    {
        errors.push(ValidationError::RedirectLoop(auth.signed_in_redirect.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`, the only table names interpolated into SQL.
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
