//! Outbound transport subsystem.
//!
//! # Data Flow
//! ```text
//! ProxyHandler
//!     → forwarding.rs (RequestInspector; Reject → synthetic 403, stop)
//!     → upstream.rs (hyper client → protected service)
//! ```
//!
//! # Design Decisions
//! - One trait, composed implementations: inspection wraps the network
//!   transport instead of replacing it
//! - Failures are returned as [`FirewallError`], never panics

pub mod forwarding;
pub mod upstream;

use axum::body::Body;
use axum::http::{Request, Response};
use futures_util::future::BoxFuture;

use crate::error::FirewallError;

pub use forwarding::{ForwardingTransport, RequestRejected};
pub use upstream::UpstreamTransport;

/// Sends one request and yields the response head with a streaming body.
pub trait Transport: Send + Sync {
    fn send(&self, request: Request<Body>) -> BoxFuture<'_, Result<Response<Body>, FirewallError>>;
}
