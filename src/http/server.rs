//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, interceptors)
//! - Build the auth gate and query layer from config
//! - Bind server to listener and shut down gracefully

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::auth::{lookup_from_config, AuthGate, AuthInterceptor};
use crate::config::SiteConfig;
use crate::db::{DatabaseConfig, QueryService, RemoteRowSource, RowSource};
use crate::http::pages::{database_report, health, not_found};
use crate::http::pipeline::{run_interceptors, InterceptorChain};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub query: QueryService,
}

/// HTTP server for the site.
pub struct HttpServer {
    router: Router,
    config: SiteConfig,
}

impl HttpServer {
    /// Create a server that queries the remote database over HTTP.
    pub fn new(config: SiteConfig, database: Option<DatabaseConfig>) -> Self {
        let source = Arc::new(RemoteRowSource::new(config.database.table.clone()));
        Self::with_source(config, database, source)
    }

    /// Create a server with an explicit row source.
    pub fn with_source(
        config: SiteConfig,
        database: Option<DatabaseConfig>,
        source: Arc<dyn RowSource>,
    ) -> Self {
        if database.is_none() {
            tracing::warn!(
                url_secret = %config.database.url_secret,
                token_secret = %config.database.token_secret,
                "Database credentials not set; database page will report a configuration error"
            );
        }

        let query = QueryService::new(
            database,
            source,
            Duration::from_millis(config.database.query_timeout_ms),
        );

        let chain = InterceptorChain::new().with(Arc::new(AuthInterceptor::new(
            lookup_from_config(&config.auth),
            AuthGate::from_config(&config.auth),
        )));

        let router = Self::build_router(&config, AppState { query }, chain);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Outermost first: set request ID, trace, propagate request ID,
    /// request timeout, interceptors, handlers.
    #[allow(deprecated)]
    fn build_router(config: &SiteConfig, state: AppState, chain: InterceptorChain) -> Router {
        Router::new()
            .route("/health", get(health))
            .route("/api/database", get(database_report))
            .fallback(not_found)
            .with_state(state)
            .layer(middleware::from_fn_with_state(Arc::new(chain), run_interceptors))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The fully layered router, for embedding or in-process tests.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            identity_source = ?self.config.auth.identity_source,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }
}
