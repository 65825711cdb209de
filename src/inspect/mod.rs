//! Inspection subsystem.
//!
//! # Data Flow
//! ```text
//! outbound request
//!     → request.rs: user agent → forbidden headers → required headers
//!                   → body size → body patterns
//!     → [forwarded upstream only on Allow]
//! upstream response
//!     → response.rs: forbidden status → body size → body patterns
//! ```
//!
//! # Design Decisions
//! - First failing check wins; later checks are not evaluated
//! - Unrestricted paths are never buffered
//! - Inspection holds no state, so repeated inspection gives the same verdict

pub mod body;
pub mod request;
pub mod response;

pub use request::RequestInspector;
pub use response::{ResponseDisposition, ResponseInspector};

/// Outcome of one inspection pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    Reject(RejectReason),
}

/// Which check rejected the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    UserAgent,
    ForbiddenHeader,
    MissingRequiredHeader,
    RequestTooLarge,
    RequestBodyPattern,
    ForbiddenStatus,
    ResponseTooLarge,
    ResponseBodyPattern,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::UserAgent => "user_agent",
            RejectReason::ForbiddenHeader => "forbidden_header",
            RejectReason::MissingRequiredHeader => "missing_required_header",
            RejectReason::RequestTooLarge => "request_too_large",
            RejectReason::RequestBodyPattern => "request_body_pattern",
            RejectReason::ForbiddenStatus => "forbidden_status",
            RejectReason::ResponseTooLarge => "response_too_large",
            RejectReason::ResponseBodyPattern => "response_body_pattern",
        }
    }

    /// Side of the exchange the check runs on.
    pub fn stage(&self) -> &'static str {
        match self {
            RejectReason::UserAgent
            | RejectReason::ForbiddenHeader
            | RejectReason::MissingRequiredHeader
            | RejectReason::RequestTooLarge
            | RejectReason::RequestBodyPattern => "request",
            RejectReason::ForbiddenStatus
            | RejectReason::ResponseTooLarge
            | RejectReason::ResponseBodyPattern => "response",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
