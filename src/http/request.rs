//! Outbound request construction.
//!
//! # Responsibilities
//! - Resolve the configured upstream origin once at startup
//! - Clone an inbound request into an outbound one: method, path, query,
//!   headers (every value, in order) and body
//!
//! # Design Decisions
//! - `Host` is not copied; the client derives it from the upstream URI
//! - Outbound requests are HTTP/1.1 whatever the inbound version

use axum::body::Body;
use axum::http::uri::{Authority, PathAndQuery, Scheme};
use axum::http::{header, Request, Uri};

use crate::config::validation::{validate_upstream, ValidationError};
use crate::error::FirewallError;

/// Scheme and authority of the protected service.
#[derive(Debug, Clone)]
pub struct UpstreamTarget {
    scheme: Scheme,
    authority: Authority,
}

impl UpstreamTarget {
    pub fn parse(base_url: &str) -> Result<Self, ValidationError> {
        let url = validate_upstream(base_url)?;
        let host = url
            .host_str()
            .ok_or_else(|| ValidationError::InvalidUpstream("missing host".to_string()))?;
        let authority = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };
        let authority = authority
            .parse::<Authority>()
            .map_err(|e| ValidationError::InvalidUpstream(e.to_string()))?;

        Ok(Self {
            scheme: Scheme::HTTP,
            authority,
        })
    }

    /// Upstream URI carrying the inbound path and query unchanged.
    pub fn uri_for(&self, inbound: &Uri) -> Result<Uri, FirewallError> {
        let path_and_query = inbound
            .path_and_query()
            .cloned()
            .unwrap_or_else(|| PathAndQuery::from_static("/"));

        Ok(Uri::builder()
            .scheme(self.scheme.clone())
            .authority(self.authority.clone())
            .path_and_query(path_and_query)
            .build()?)
    }
}

/// Rebuild `inbound` as a request to `target`.
pub fn outbound_request(
    target: &UpstreamTarget,
    inbound: Request<Body>,
) -> Result<Request<Body>, FirewallError> {
    let (parts, body) = inbound.into_parts();
    let uri = target.uri_for(&parts.uri)?;

    let mut outbound = Request::builder().method(parts.method).uri(uri).body(body)?;

    let headers = outbound.headers_mut();
    for (name, value) in parts.headers.iter() {
        if *name == header::HOST {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }

    Ok(outbound)
}
