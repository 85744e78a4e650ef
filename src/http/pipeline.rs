//! Ordered request interceptors.
//!
//! # Data Flow
//! ```text
//! request
//!     → interceptor[0] → Continue
//!     → interceptor[1] → Respond(response)   (remaining interceptors skipped)
//!     → handlers run only if every interceptor said Continue
//! ```
//!
//! The whole chain is mounted as one axum middleware, so the order is the
//! order of the `Vec`, not the order layers happen to be stacked.

use std::fmt::Debug;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{request::Parts, Request},
    middleware::Next,
    response::Response,
};

/// Result of one interceptor.
#[derive(Debug)]
pub enum Flow {
    Continue,
    Respond(Response),
}

/// One stage that may answer a request before routing.
pub trait Interceptor: Send + Sync + Debug {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    fn intercept(&self, parts: &Parts) -> Flow;
}

#[derive(Debug, Clone, Default)]
pub struct InterceptorChain {
    stages: Vec<Arc<dyn Interceptor>>,
}

impl InterceptorChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage; it runs after every stage already added.
    pub fn with(mut self, stage: Arc<dyn Interceptor>) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// First response produced by a stage, if any.
    pub fn evaluate(&self, parts: &Parts) -> Option<Response> {
        for stage in &self.stages {
            if let Flow::Respond(response) = stage.intercept(parts) {
                tracing::trace!(
                    interceptor = stage.name(),
                    status = %response.status(),
                    "Request answered by interceptor"
                );
                return Some(response);
            }
        }
        None
    }
}

/// axum middleware running an [`InterceptorChain`].
pub async fn run_interceptors(
    State(chain): State<Arc<InterceptorChain>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let (parts, body) = request.into_parts();
    if let Some(response) = chain.evaluate(&parts) {
        return response;
    }
    next.run(Request::from_parts(parts, body)).await
}
