//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the single catch-all handler
//! - Wire up middleware (tracing)
//! - Build the transport chain: inspection wrapped around the network client
//! - Serve on a listener until shutdown is signalled

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{routing::any, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::{ConfigError, FirewallConfig};
use crate::http::handler::proxy_handler;
use crate::http::request::UpstreamTarget;
use crate::inspect::{RequestInspector, ResponseInspector};
use crate::rules::RuleTable;
use crate::transport::{ForwardingTransport, Transport, UpstreamTransport};

/// Application state injected into handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub transport: Arc<dyn Transport>,
    pub responses: ResponseInspector,
    pub upstream: Arc<UpstreamTarget>,
    pub request_timeout: Duration,
}

/// HTTP server for the firewall.
pub struct FirewallServer {
    router: Router,
    config: FirewallConfig,
}

impl FirewallServer {
    /// Create a server forwarding to the configured upstream over the network.
    pub fn new(config: FirewallConfig, rules: RuleTable) -> Result<Self, ConfigError> {
        let network: Arc<dyn Transport> = Arc::new(UpstreamTransport::new(&config.timeouts));
        Self::with_transport(config, Arc::new(rules), network)
    }

    /// Create a server sending allowed requests through `network`.
    pub fn with_transport(
        config: FirewallConfig,
        rules: Arc<RuleTable>,
        network: Arc<dyn Transport>,
    ) -> Result<Self, ConfigError> {
        let upstream = UpstreamTarget::parse(&config.upstream.base_url)
            .map_err(|e| ConfigError::Validation(vec![e]))?;

        let transport = ForwardingTransport::new(RequestInspector::new(rules.clone()), network);

        let state = AppState {
            transport: Arc::new(transport),
            responses: ResponseInspector::new(rules),
            upstream: Arc::new(upstream),
            request_timeout: Duration::from_secs(config.timeouts.request_secs),
        };

        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", any(proxy_handler))
            .route("/{*path}", any(proxy_handler))
            .with_state(state)
            .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
    }

    /// The router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
