//! Compiled per-endpoint rule set.

use std::collections::HashSet;

use crate::rules::header_spec::HeaderSpec;
use crate::rules::pattern::{compile_all, Pattern};
use crate::rules::record::RestrictionRecord;

/// The inspection rules bound to one endpoint path.
///
/// Built once from a [`RestrictionRecord`]; patterns and header specifiers
/// are compiled up front so inspection never parses configuration.
#[derive(Debug, Clone, Default)]
pub struct Restriction {
    pub forbidden_user_agents: Vec<Pattern>,
    pub forbidden_headers: Vec<HeaderSpec>,
    pub required_headers: Vec<HeaderSpec>,
    pub forbidden_request_patterns: Vec<Pattern>,
    pub forbidden_response_patterns: Vec<Pattern>,
    pub forbidden_status_codes: HashSet<u16>,
    /// `None` means no limit.
    pub max_request_bytes: Option<usize>,
    /// `None` means no limit.
    pub max_response_bytes: Option<usize>,
}

impl Restriction {
    /// True when `len` is over a configured limit.
    pub fn request_too_large(&self, len: usize) -> bool {
        exceeds(self.max_request_bytes, len)
    }

    pub fn response_too_large(&self, len: usize) -> bool {
        exceeds(self.max_response_bytes, len)
    }

    /// Whether any request-side check needs the body.
    pub fn inspects_request_body(&self) -> bool {
        self.max_request_bytes.is_some() || !self.forbidden_request_patterns.is_empty()
    }

    /// Whether any response-side check needs the body.
    pub fn inspects_response_body(&self) -> bool {
        self.max_response_bytes.is_some() || !self.forbidden_response_patterns.is_empty()
    }
}

impl From<&RestrictionRecord> for Restriction {
    fn from(record: &RestrictionRecord) -> Self {
        Self {
            forbidden_user_agents: compile_all(&record.forbidden_user_agents),
            forbidden_headers: record
                .forbidden_headers
                .iter()
                .map(|s| HeaderSpec::parse(s))
                .collect(),
            required_headers: record
                .required_headers
                .iter()
                .map(|s| HeaderSpec::parse(s))
                .collect(),
            forbidden_request_patterns: compile_all(&record.forbidden_request_patterns),
            forbidden_response_patterns: compile_all(&record.forbidden_response_patterns),
            forbidden_status_codes: record.forbidden_status_codes.iter().copied().collect(),
            max_request_bytes: byte_limit(record.max_request_bytes),
            max_response_bytes: byte_limit(record.max_response_bytes),
        }
    }
}

fn byte_limit(configured: i64) -> Option<usize> {
    if configured > 0 {
        Some(usize::try_from(configured).unwrap_or(usize::MAX))
    } else {
        None
    }
}

fn exceeds(limit: Option<usize>, len: usize) -> bool {
    limit.is_some_and(|max| len > max)
}
