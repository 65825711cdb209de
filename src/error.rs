//! Per-request error taxonomy.
//!
//! Configuration problems are reported separately through
//! [`ConfigError`](crate::config::loader::ConfigError) and are fatal at
//! startup. Everything here is recoverable: the affected request is answered
//! with a gateway error and the process keeps serving.

use std::time::Duration;

use axum::http::StatusCode;
use thiserror::Error;

/// Errors raised while forwarding a single request.
#[derive(Debug, Error)]
pub enum FirewallError {
    /// The outbound send failed (connect refused, reset, DNS, ...).
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(#[from] hyper_util::client::legacy::Error),

    /// The request deadline elapsed before the exchange completed.
    #[error("upstream did not answer within {0:?}")]
    UpstreamTimeout(Duration),

    /// A request or response body failed mid-stream.
    #[error("body read failed: {0}")]
    BodyRead(#[from] axum::Error),

    /// The inbound request could not be turned into an outbound one.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] axum::http::Error),
}

impl FirewallError {
    /// Status code written to the client for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            FirewallError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            FirewallError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            FirewallError::BodyRead(_) => StatusCode::BAD_GATEWAY,
            FirewallError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            FirewallError::UpstreamUnavailable(_) => "unavailable",
            FirewallError::UpstreamTimeout(_) => "timeout",
            FirewallError::BodyRead(_) => "body_read",
            FirewallError::InvalidRequest(_) => "invalid_request",
        }
    }
}
