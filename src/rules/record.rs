//! On-disk rule shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One restriction as written in the rule file, before compilation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RestrictionRecord {
    /// Endpoint path this restriction guards (exact match).
    pub endpoint: String,

    /// Regular expressions matched against the `User-Agent` header.
    pub forbidden_user_agents: Vec<String>,

    /// `name` or `name: value` specifiers that must not be present.
    pub forbidden_headers: Vec<String>,

    /// `name` or `name: value` specifiers that must be present.
    pub required_headers: Vec<String>,

    /// Regular expressions matched against the raw request body.
    #[serde(rename = "forbidden_request_re")]
    pub forbidden_request_patterns: Vec<String>,

    /// Regular expressions matched against the raw response body.
    #[serde(rename = "forbidden_response_re")]
    pub forbidden_response_patterns: Vec<String>,

    /// Upstream status codes that are never returned to the client.
    #[serde(rename = "forbidden_response_codes")]
    pub forbidden_status_codes: Vec<u16>,

    /// Request body limit in bytes; zero or negative disables it.
    #[serde(rename = "max_request_length_bytes")]
    pub max_request_bytes: i64,

    /// Response body limit in bytes; zero or negative disables it.
    #[serde(rename = "max_response_length_bytes")]
    pub max_response_bytes: i64,
}

/// Top-level rule document: named lists of records, of which `rules` is used.
pub type RuleDocument = BTreeMap<String, Vec<RestrictionRecord>>;

/// Key holding the active rule list.
pub const RULES_KEY: &str = "rules";
