//! Catch-all proxy handler.
//!
//! # States
//! ```text
//! Received → Forwarding → Inspecting → Rejected | Delivered
//!                 │             │
//!                 └─────────────┴──────→ Errored
//! ```
//! Every terminal state produces exactly one response.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, Response},
};
use tracing::Instrument;
use uuid::Uuid;

use crate::error::FirewallError;
use crate::http::request::outbound_request;
use crate::http::response::{deliver, forbidden, gateway_error};
use crate::http::server::AppState;
use crate::inspect::{RejectReason, ResponseDisposition};
use crate::observability::metrics;
use crate::transport::RequestRejected;

/// Terminal state of one exchange.
#[derive(Debug)]
pub enum Outcome {
    Rejected(RejectReason),
    Delivered(Response<Body>),
    Errored(FirewallError),
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Rejected(_) => "rejected",
            Outcome::Delivered(_) => "delivered",
            Outcome::Errored(_) => "errored",
        }
    }

    /// The single response written to the client.
    pub fn into_response(self) -> Response<Body> {
        match self {
            Outcome::Rejected(_) => forbidden(),
            Outcome::Delivered(upstream) => deliver(upstream),
            Outcome::Errored(e) => gateway_error(&e),
        }
    }
}

pub async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response<Body> {
    let start_time = Instant::now();
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_default();
    let method = request.method().to_string();
    let path = request.uri().path().to_owned();

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %path,
        peer = %peer
    );

    async move {
        tracing::debug!("Received");

        let outcome = match tokio::time::timeout(
            state.request_timeout,
            process(&state, &path, request),
        )
        .await
        {
            Ok(outcome) => outcome,
            Err(_) => Outcome::Errored(FirewallError::UpstreamTimeout(state.request_timeout)),
        };

        let label = outcome.label();
        match &outcome {
            Outcome::Rejected(reason) => {
                tracing::info!(stage = reason.stage(), reason = %reason, "Rejected");
            }
            Outcome::Delivered(response) => {
                tracing::debug!(status = %response.status(), "Delivered");
            }
            Outcome::Errored(e) => {
                tracing::warn!(error = %e, "Errored");
                metrics::record_upstream_error(e);
            }
        }

        let response = outcome.into_response();
        metrics::record_request(&method, response.status().as_u16(), label, start_time);
        response
    }
    .instrument(span)
    .await
}

/// Drive one request from `Received` to a terminal state.
async fn process(state: &AppState, path: &str, request: Request<Body>) -> Outcome {
    let outbound = match outbound_request(&state.upstream, request) {
        Ok(r) => r,
        Err(e) => return Outcome::Errored(e),
    };

    tracing::debug!(upstream = %outbound.uri(), "Forwarding");
    let response = match state.transport.send(outbound).await {
        Ok(r) => r,
        Err(e) => return Outcome::Errored(e),
    };

    if let Some(RequestRejected(reason)) = response.extensions().get::<RequestRejected>() {
        return Outcome::Rejected(*reason);
    }

    tracing::debug!(status = %response.status(), "Inspecting");
    match state.responses.inspect(path, response).await {
        Ok(ResponseDisposition::Deliver(response)) => Outcome::Delivered(response),
        Ok(ResponseDisposition::Reject(reason)) => {
            metrics::record_rejection(reason);
            Outcome::Rejected(reason)
        }
        Err(e) => Outcome::Errored(e),
    }
}
