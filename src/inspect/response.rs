//! Response-side inspection.
//!
//! Runs only after the request was allowed and the upstream answered. The
//! status check comes first so that bodies about to be discarded are never
//! buffered.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Response, StatusCode};

use crate::error::FirewallError;
use crate::inspect::body::buffer_body;
use crate::inspect::{RejectReason, Verdict};
use crate::rules::pattern::any_match;
use crate::rules::{Restriction, RuleTable};

/// What to do with an upstream response.
#[derive(Debug)]
pub enum ResponseDisposition {
    /// Discard the upstream response and answer with a rejection.
    Reject(RejectReason),
    /// Return this response. Its body is the buffered copy for restricted
    /// paths, or the untouched upstream stream otherwise.
    Deliver(Response<Body>),
}

/// Evaluates upstream responses against the rule table.
#[derive(Debug, Clone)]
pub struct ResponseInspector {
    rules: Arc<RuleTable>,
}

impl ResponseInspector {
    pub fn new(rules: Arc<RuleTable>) -> Self {
        Self { rules }
    }

    /// Inspect `response` for `path`.
    ///
    /// Fails with [`FirewallError::BodyRead`] when a body that must be
    /// checked cannot be read to completion.
    pub async fn inspect(
        &self,
        path: &str,
        response: Response<Body>,
    ) -> Result<ResponseDisposition, FirewallError> {
        let Some(restriction) = self.rules.get(path) else {
            return Ok(ResponseDisposition::Deliver(response));
        };

        if let Verdict::Reject(reason) = check_response_status(restriction, response.status()) {
            return Ok(ResponseDisposition::Reject(reason));
        }

        if !restriction.inspects_response_body() {
            return Ok(ResponseDisposition::Deliver(response));
        }

        let (parts, body) = response.into_parts();
        let buffered = buffer_body(body).await;
        if let Some(e) = buffered.error {
            return Err(FirewallError::BodyRead(e));
        }

        match check_response_body(restriction, &buffered.bytes) {
            Verdict::Reject(reason) => Ok(ResponseDisposition::Reject(reason)),
            Verdict::Allow => Ok(ResponseDisposition::Deliver(Response::from_parts(
                parts,
                Body::from(buffered.bytes),
            ))),
        }
    }
}

pub fn check_response_status(restriction: &Restriction, status: StatusCode) -> Verdict {
    if restriction.forbidden_status_codes.contains(&status.as_u16()) {
        Verdict::Reject(RejectReason::ForbiddenStatus)
    } else {
        Verdict::Allow
    }
}

/// Body checks, in order: size limit, forbidden patterns.
pub fn check_response_body(restriction: &Restriction, body: &[u8]) -> Verdict {
    if restriction.response_too_large(body.len()) {
        return Verdict::Reject(RejectReason::ResponseTooLarge);
    }
    if any_match(&restriction.forbidden_response_patterns, body) {
        return Verdict::Reject(RejectReason::ResponseBodyPattern);
    }
    Verdict::Allow
}
