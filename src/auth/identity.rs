//! Per-request identity lookup.
//!
//! # Responsibilities
//! - Ask the identity provider integration who the request belongs to
//! - Never fail: anything unreadable is treated as signed out
//!
//! # Design Decisions
//! - Session issuance and verification live in the provider, not here
//! - The header source trusts its header; strip it at the edge
//! - Lookup is synchronous; providers resolve sessions before the gate runs

use std::fmt::Debug;
use std::sync::Arc;

use axum::http::request::Parts;
use axum::http::HeaderName;

use crate::auth::fixture::{mock_user_session, MockUserSession};
use crate::config::{AuthConfig, IdentitySource};

/// What the provider reports for one request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IdentityState {
    pub signed_in: bool,
    pub user_id: Option<String>,
}

impl IdentityState {
    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self {
            signed_in: true,
            user_id: Some(user_id.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

/// Session lookup capability.
pub trait IdentityLookup: Send + Sync + Debug {
    fn lookup(&self, parts: &Parts) -> IdentityState;
}

/// Reads the user id from a header set by the provider's edge.
#[derive(Debug, Clone)]
pub struct HeaderIdentity {
    header: HeaderName,
}

impl HeaderIdentity {
    pub fn new(header: HeaderName) -> Self {
        Self { header }
    }
}

impl IdentityLookup for HeaderIdentity {
    fn lookup(&self, parts: &Parts) -> IdentityState {
        parts
            .headers
            .get(&self.header)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(IdentityState::signed_in)
            .unwrap_or_default()
    }
}

/// Every request belongs to the mock session.
#[derive(Debug, Clone)]
pub struct FixtureIdentity {
    session: MockUserSession,
}

impl FixtureIdentity {
    pub fn new(session: MockUserSession) -> Self {
        Self { session }
    }
}

impl Default for FixtureIdentity {
    fn default() -> Self {
        Self::new(mock_user_session())
    }
}

impl IdentityLookup for FixtureIdentity {
    fn lookup(&self, _parts: &Parts) -> IdentityState {
        IdentityState {
            signed_in: self.session.is_authenticated,
            user_id: Some(self.session.id.clone()),
        }
    }
}

/// Every request is signed out.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnonymousIdentity;

impl IdentityLookup for AnonymousIdentity {
    fn lookup(&self, _parts: &Parts) -> IdentityState {
        IdentityState::anonymous()
    }
}

/// Build the configured lookup.
pub fn lookup_from_config(config: &AuthConfig) -> Arc<dyn IdentityLookup> {
    match config.identity_source {
        IdentitySource::Header => match HeaderName::from_bytes(config.user_id_header.as_bytes()) {
            Ok(header) => Arc::new(HeaderIdentity::new(header)),
            Err(e) => {
                tracing::error!(
                    header = %config.user_id_header,
                    error = %e,
                    "Invalid identity header; treating all requests as anonymous"
                );
                Arc::new(AnonymousIdentity)
            }
        },
        IdentitySource::Fixture => {
            tracing::warn!("Using mock user session; every request is signed in");
            Arc::new(FixtureIdentity::default())
        }
        IdentitySource::Anonymous => Arc::new(AnonymousIdentity),
    }
}
