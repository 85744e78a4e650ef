//! The redirect decision.
//!
//! # Policy
//! ```text
//! claim present AND path starts with a guarded prefix → RedirectTo(target)
//! anything else                                       → PassThrough
//! ```
//!
//! Pure: no I/O, no state between requests. Prefix matching is a plain
//! `starts_with`, so `/sign-in`, `/sign-in/factor-one` and `/sign-inbox`
//! all match `/sign-in`.

use crate::auth::identity::IdentityState;
use crate::config::AuthConfig;

pub const SIGN_IN_PREFIX: &str = "/sign-in";
pub const SIGN_UP_PREFIX: &str = "/sign-up";
pub const PROFILE_PATH: &str = "/profile";

/// Who the request claims to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityClaim {
    /// Signed in, with a non-empty user id.
    Present(String),
    Absent,
}

impl IdentityClaim {
    /// Present only for a signed-in state with a non-blank user id.
    pub fn from_state(state: &IdentityState) -> Self {
        match state.user_id.as_deref().map(str::trim) {
            Some(id) if state.signed_in && !id.is_empty() => Self::Present(id.to_string()),
            _ => Self::Absent,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            Self::Present(id) => Some(id),
            Self::Absent => None,
        }
    }
}

/// What to do with the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectDecision {
    PassThrough,
    RedirectTo(String),
}

/// Decide with the built-in policy: sign-in and sign-up go to the profile.
pub fn decide(claim: &IdentityClaim, request_path: &str) -> RedirectDecision {
    decide_with(
        claim,
        request_path,
        [SIGN_IN_PREFIX, SIGN_UP_PREFIX],
        PROFILE_PATH,
    )
}

fn decide_with<'p>(
    claim: &IdentityClaim,
    request_path: &str,
    guarded: impl IntoIterator<Item = &'p str>,
    target: &str,
) -> RedirectDecision {
    if claim.is_present() && guarded.into_iter().any(|p| request_path.starts_with(p)) {
        RedirectDecision::RedirectTo(target.to_string())
    } else {
        RedirectDecision::PassThrough
    }
}

/// Configurable form of [`decide`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthGate {
    guarded_prefixes: Vec<String>,
    redirect_to: String,
}

impl AuthGate {
    pub fn new(guarded_prefixes: Vec<String>, redirect_to: impl Into<String>) -> Self {
        Self {
            guarded_prefixes,
            redirect_to: redirect_to.into(),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            config.guarded_prefixes.clone(),
            config.signed_in_redirect.clone(),
        )
    }

    pub fn decide(&self, claim: &IdentityClaim, request_path: &str) -> RedirectDecision {
        decide_with(
            claim,
            request_path,
            self.guarded_prefixes.iter().map(String::as_str),
            &self.redirect_to,
        )
    }
}

impl Default for AuthGate {
    fn default() -> Self {
        Self::new(
            vec![SIGN_IN_PREFIX.to_string(), SIGN_UP_PREFIX.to_string()],
            PROFILE_PATH,
        )
    }
}
