//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the submission endpoints
//! - Wire up middleware (timeout, body limit, request ID, tracing, panic recovery)
//! - Own the rate limiter lifecycle
//! - Serve with graceful shutdown

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Response as HttpResponse;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::http::handlers;
use crate::security::RateLimiter;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub rate_limiter: Arc<RateLimiter>,
}

/// HTTP server for the form gateway.
pub struct HttpServer {
    router: Router,
    rate_limiter: Arc<RateLimiter>,
}

impl HttpServer {
    /// Create a new server with the given configuration.
    ///
    /// Connects to the shared rate-limit store when one is configured;
    /// otherwise the in-memory limiter carries the load alone.
    pub async fn new(config: GatewayConfig) -> Self {
        let rate_limiter = Arc::new(RateLimiter::from_config(&config.rate_limit, &config.redis).await);

        let state = AppState {
            config: Arc::new(config.clone()),
            rate_limiter: Arc::clone(&rate_limiter),
        };

        let router = Self::build_router(&config, state);
        Self {
            router,
            rate_limiter,
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/api/contact", post(handlers::submit_contact))
            .route("/api/newsletter", post(handlers::subscribe_newsletter))
            .route("/api/form-token", get(handlers::issue_form_token))
            .route("/healthz", get(handlers::health))
            .with_state(state)
            // Innermost first; panic recovery sits closest to the
            // handlers so every other layer sees a real response.
            .layer(CatchPanicLayer::custom(recover_panic))
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener until the
    /// shutdown channel fires or ctrl-c arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self.router.into_make_service();
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        self.rate_limiter.shutdown();
        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Wait for either ctrl-c or an explicit shutdown trigger.
async fn shutdown_signal(mut shutdown: broadcast::Receiver<()>) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if result.is_ok() {
                tracing::info!("Shutdown signal received");
            }
        }
        _ = shutdown.recv() => {
            tracing::info!("Shutdown triggered");
        }
    }
}

/// Orchestrator boundary for unexpected panics: log internally, answer with
/// a generic 500, leak nothing.
fn recover_panic(err: Box<dyn Any + Send + 'static>) -> HttpResponse<Body> {
    let detail = err
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| err.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string());
    tracing::error!(detail = %detail, "Handler panicked");
    crate::http::response::internal_error()
}
