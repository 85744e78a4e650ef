//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, layer stack)
//!     → request.rs (assign / propagate request ID)
//!     → pipeline.rs (ordered interceptors; auth gate may answer 302)
//!     → pages.rs (health, database report, fallback)
//!     → response.rs (redirects, outcome JSON)
//!     → Send to client
//! ```

pub mod pages;
pub mod pipeline;
pub mod request;
pub mod response;
pub mod server;

pub use pipeline::{Flow, Interceptor, InterceptorChain};
pub use request::{RequestIdExt, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
