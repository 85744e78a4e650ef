//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → SiteConfig (validated, immutable)
//!
//! process environment
//!     → secrets.rs (named lookup, blank = absent)
//!     → DatabaseConfig (built once, shared via Arc)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no hot reload
//! - Every field has a default; an empty file is a valid config
//! - Secrets never appear in the config file

pub mod loader;
pub mod schema;
pub mod secrets;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    AuthConfig, DatabaseSettings, IdentitySource, ListenerConfig, LogFormat,
    ObservabilityConfig, SiteConfig, TimeoutConfig,
};
pub use secrets::{EnvSecrets, SecretSource, StaticSecrets};
