//! Authentication gate subsystem.
//!
//! # Data Flow
//! ```text
//! request parts
//!     → identity.rs (provider lookup → IdentityState, never fails)
//!     → gate.rs (IdentityClaim + path → RedirectDecision)
//!     → middleware.rs (302 + Location, or continue)
//! ```
//!
//! # Design Decisions
//! - The decision is a pure function; only the lookup touches the request
//! - Runs before route dispatch, once per request
//! - No route is protected; the gate only moves signed-in users along

pub mod fixture;
pub mod gate;
pub mod identity;
pub mod middleware;

pub use gate::{decide, AuthGate, IdentityClaim, RedirectDecision};
pub use identity::{
    lookup_from_config, AnonymousIdentity, FixtureIdentity, HeaderIdentity, IdentityLookup,
    IdentityState,
};
pub use middleware::AuthInterceptor;
