//! Header specifiers: `name` or `name: value`.
//!
//! The specifier is split on the first `": "`. A value containing `": "`
//! itself cannot be expressed.

use axum::http::{HeaderMap, HeaderName};

const SEPARATOR: &str = ": ";

/// A parsed header specifier.
#[derive(Debug, Clone)]
pub struct HeaderSpec {
    /// `None` when the configured name is not a valid header name; such a
    /// header can never be present on a request.
    name: Option<HeaderName>,
    value: Option<String>,
}

impl HeaderSpec {
    pub fn parse(raw: &str) -> Self {
        let (name, value) = match raw.split_once(SEPARATOR) {
            Some((name, value)) if !value.is_empty() => (name, Some(value.to_string())),
            Some((name, _)) => (name, None),
            None => (raw, None),
        };

        let parsed = match HeaderName::from_bytes(name.as_bytes()) {
            Ok(n) => Some(n),
            Err(_) => {
                tracing::warn!(
                    specifier = raw,
                    "invalid header name in rule; header is treated as never present"
                );
                None
            }
        };

        Self {
            name: parsed,
            value,
        }
    }

    /// True when the header is present and, for `name: value`, carries that
    /// exact value among its values.
    pub fn is_satisfied_by(&self, headers: &HeaderMap) -> bool {
        let Some(name) = &self.name else {
            return false;
        };
        match &self.value {
            None => headers.contains_key(name),
            Some(expected) => headers
                .get_all(name)
                .iter()
                .any(|v| v.as_bytes() == expected.as_bytes()),
        }
    }
}
