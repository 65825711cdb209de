//! Compiled body and user-agent patterns.

use regex::bytes::Regex;

/// A regular expression from the rule file.
///
/// Patterns that fail to compile are reported once and kept as a slot that
/// never matches anything. Other patterns in the same list are unaffected.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Option<Regex>,
}

impl Pattern {
    /// Compile `source`, logging and disabling it on failure.
    pub fn compile(source: &str) -> Self {
        let regex = match Regex::new(source) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::warn!(
                    pattern = %source,
                    error = %e,
                    "failed to compile rule pattern; treating as non-match"
                );
                None
            }
        };
        Self { regex }
    }

    /// True only on a confirmed match.
    pub fn is_match(&self, haystack: &[u8]) -> bool {
        self.regex.as_ref().is_some_and(|re| re.is_match(haystack))
    }
}

/// Compile every pattern in order.
pub fn compile_all(sources: &[String]) -> Vec<Pattern> {
    sources.iter().map(|s| Pattern::compile(s.as_str())).collect()
}

/// True when any pattern matches `haystack`.
pub fn any_match(patterns: &[Pattern], haystack: &[u8]) -> bool {
    patterns.iter().any(|p| p.is_match(haystack))
}
