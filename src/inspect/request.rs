//! Request-side inspection.
//!
//! # Responsibilities
//! - Look up the restriction for the request path
//! - Check user agent, forbidden and required headers
//! - Buffer the body once, restore it, check size and patterns
//!
//! # Design Decisions
//! - A body that fails to read skips the body checks and is forwarded with
//!   whatever was read. This is fail-open and kept for compatibility.

use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::http::header::{CONTENT_LENGTH, TRANSFER_ENCODING, USER_AGENT};
use axum::http::{HeaderMap, HeaderValue, Request};

use crate::inspect::body::buffer_body;
use crate::inspect::{RejectReason, Verdict};
use crate::rules::pattern::any_match;
use crate::rules::{Restriction, RuleTable};

/// Evaluates outbound requests against the rule table.
#[derive(Debug, Clone)]
pub struct RequestInspector {
    rules: Arc<RuleTable>,
}

impl RequestInspector {
    pub fn new(rules: Arc<RuleTable>) -> Self {
        Self { rules }
    }

    /// Inspect `request` for `path`.
    ///
    /// When body checks run, the body is replaced by a buffered copy so the
    /// request can still be forwarded. Its framing headers are rewritten to
    /// describe the buffered bytes, which after a read failure are fewer
    /// than the client announced.
    pub async fn inspect(&self, path: &str, request: &mut Request<Body>) -> Verdict {
        let Some(restriction) = self.rules.get(path) else {
            return Verdict::Allow;
        };

        if let Verdict::Reject(reason) = check_request_headers(restriction, request.headers()) {
            return Verdict::Reject(reason);
        }

        if !restriction.inspects_request_body() {
            return Verdict::Allow;
        }

        let body = std::mem::take(request.body_mut());
        let buffered = buffer_body(body).await;
        restore_body(request, buffered.bytes.clone());

        if let Some(e) = buffered.error {
            tracing::warn!(
                path,
                bytes_read = buffered.bytes.len(),
                error = %e,
                "request body read failed; skipping body checks"
            );
            return Verdict::Allow;
        }

        check_request_body(restriction, &buffered.bytes)
    }
}

fn restore_body(request: &mut Request<Body>, bytes: Bytes) {
    let headers = request.headers_mut();
    headers.remove(TRANSFER_ENCODING);
    headers.insert(CONTENT_LENGTH, HeaderValue::from(bytes.len()));
    *request.body_mut() = Body::from(bytes);
}

/// Header checks, in order: user agent, forbidden headers, required headers.
pub fn check_request_headers(restriction: &Restriction, headers: &HeaderMap) -> Verdict {
    let user_agent = headers
        .get(USER_AGENT)
        .map(|v| v.as_bytes())
        .unwrap_or_default();
    if any_match(&restriction.forbidden_user_agents, user_agent) {
        return Verdict::Reject(RejectReason::UserAgent);
    }

    if restriction
        .forbidden_headers
        .iter()
        .any(|spec| spec.is_satisfied_by(headers))
    {
        return Verdict::Reject(RejectReason::ForbiddenHeader);
    }

    if !restriction
        .required_headers
        .iter()
        .all(|spec| spec.is_satisfied_by(headers))
    {
        return Verdict::Reject(RejectReason::MissingRequiredHeader);
    }

    Verdict::Allow
}

/// Body checks, in order: size limit, forbidden patterns.
pub fn check_request_body(restriction: &Restriction, body: &[u8]) -> Verdict {
    if restriction.request_too_large(body.len()) {
        return Verdict::Reject(RejectReason::RequestTooLarge);
    }
    if any_match(&restriction.forbidden_request_patterns, body) {
        return Verdict::Reject(RejectReason::RequestBodyPattern);
    }
    Verdict::Allow
}
