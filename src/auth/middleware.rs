//! Auth gate as a request interceptor.

use std::sync::Arc;

use axum::http::request::Parts;

use crate::auth::gate::{AuthGate, IdentityClaim, RedirectDecision};
use crate::auth::identity::IdentityLookup;
use crate::http::pipeline::{Flow, Interceptor};
use crate::http::request::RequestIdExt;
use crate::http::response::redirect_response;
use crate::observability::metrics;

/// Looks the identity up, asks the gate, and redirects when told to.
#[derive(Debug, Clone)]
pub struct AuthInterceptor {
    lookup: Arc<dyn IdentityLookup>,
    gate: AuthGate,
}

impl AuthInterceptor {
    pub fn new(lookup: Arc<dyn IdentityLookup>, gate: AuthGate) -> Self {
        Self { lookup, gate }
    }
}

impl Interceptor for AuthInterceptor {
    fn name(&self) -> &'static str {
        "auth_gate"
    }

    fn intercept(&self, parts: &Parts) -> Flow {
        let claim = IdentityClaim::from_state(&self.lookup.lookup(parts));
        let path = parts.uri.path();

        match self.gate.decide(&claim, path) {
            RedirectDecision::PassThrough => {
                metrics::record_auth_decision(false);
                Flow::Continue
            }
            RedirectDecision::RedirectTo(target) => {
                tracing::debug!(
                    request_id = %parts.request_id(),
                    user_id = claim.user_id().unwrap_or_default(),
                    path = %path,
                    target = %target,
                    "Signed-in user redirected away from auth page"
                );
                metrics::record_auth_decision(true);
                Flow::Respond(redirect_response(&target))
            }
        }
    }
}
