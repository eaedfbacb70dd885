//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Serve on a bound listener until shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, http::Request, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{RelayConfig, RobotConfig};
use crate::http::handlers;
use crate::http::request::{request_id_of, MakeRequestUuidV4};
use crate::lifecycle::shutdown::wait_for;
use crate::rosbridge::RosbridgeClient;

/// Application state injected into handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub client: RosbridgeClient,
    pub robot: Arc<RobotConfig>,
}

impl AppState {
    pub fn new(config: &RelayConfig) -> Self {
        Self {
            client: RosbridgeClient::new(&config.robot, &config.timeouts),
            robot: Arc::new(config.robot.clone()),
        }
    }
}

/// HTTP server for the topic relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Self {
        let state = AppState::new(&config);
        let router = build_router(&config, state);
        Self { router, config }
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            rosbridge_url = %self.config.robot.rosbridge_url(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(wait_for(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &RelayConfig, state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/api/topics", get(handlers::topics))
        .route("/api/robot_config", get(handlers::robot_config))
        .route("/healthz", get(handlers::health))
        .with_state(state)
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request_id_of(request),
                )
            }),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
}
