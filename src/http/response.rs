//! Client-facing responses.
//!
//! # Responsibilities
//! - The fixed rejection response (403, body `Forbidden`)
//! - Gateway error responses for failed exchanges
//! - Rebuilding an allowed upstream response for the client
//!
//! # Design Decisions
//! - Rejections ignore everything the upstream sent
//! - Upstream headers are copied value by value so repeated headers keep
//!   their multiplicity and order

use axum::body::Body;
use axum::http::{Response, StatusCode};

use crate::error::FirewallError;

/// Body of every rejection.
pub const FORBIDDEN_BODY: &str = "Forbidden";

/// The synthetic rejection: status 403, no custom headers.
pub fn forbidden() -> Response<Body> {
    let mut response = Response::new(Body::from(FORBIDDEN_BODY));
    *response.status_mut() = StatusCode::FORBIDDEN;
    response
}

/// Answer for a request that could not be completed.
pub fn gateway_error(error: &FirewallError) -> Response<Body> {
    let body = match error {
        FirewallError::UpstreamUnavailable(_) => Body::from("Upstream request failed"),
        FirewallError::UpstreamTimeout(_) => Body::from("Upstream request timed out"),
        // Nothing of the upstream response is sent.
        FirewallError::BodyRead(_) => Body::empty(),
        FirewallError::InvalidRequest(_) => Body::from("Bad request"),
    };
    let mut response = Response::new(body);
    *response.status_mut() = error.status_code();
    response
}

/// Copy headers, then status, then body of an allowed upstream response.
pub fn deliver(upstream: Response<Body>) -> Response<Body> {
    let (parts, body) = upstream.into_parts();

    let mut response = Response::new(body);
    let headers = response.headers_mut();
    for (name, value) in parts.headers.iter() {
        headers.append(name.clone(), value.clone());
    }
    *response.status_mut() = parts.status;
    response
}
