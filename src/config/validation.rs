//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and the upstream base URL
//! - Validate value ranges (timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: FirewallConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::FirewallConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: '{value}' is not a socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("upstream.base_url: {0}")]
    InvalidUpstream(String),

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("observability.log_level: unknown level '{0}'")]
    UnknownLogLevel(String),
}

/// Check a loaded configuration, collecting every problem found.
pub fn validate_config(config: &FirewallConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if let Err(e) = validate_upstream(&config.upstream.base_url) {
        errors.push(e);
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.connect_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.request_secs"));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// The base URL must name an origin only, so the path the inspectors see on
/// the outbound request is the inbound path.
pub fn validate_upstream(base_url: &str) -> Result<Url, ValidationError> {
    let url = Url::parse(base_url)
        .map_err(|e| ValidationError::InvalidUpstream(format!("'{}': {}", base_url, e)))?;

    if url.scheme() != "http" {
        return Err(ValidationError::InvalidUpstream(format!(
            "unsupported scheme '{}', only http is supported",
            url.scheme()
        )));
    }
    if url.host_str().is_none() {
        return Err(ValidationError::InvalidUpstream("missing host".to_string()));
    }
    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err(ValidationError::InvalidUpstream(format!(
            "'{}' must not carry a path, query or fragment",
            base_url
        )));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&FirewallConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = FirewallConfig::default();
        config.listener.bind_address = "nowhere".into();
        config.upstream.base_url = "ftp://sports".into();
        config.timeouts.request_secs = 0;
        config.observability.log_level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(matches!(errors[0], ValidationError::InvalidAddress { .. }));
        assert!(matches!(errors[1], ValidationError::InvalidUpstream(_)));
        assert_eq!(errors[2], ValidationError::ZeroTimeout("timeouts.request_secs"));
        assert_eq!(errors[3], ValidationError::UnknownLogLevel("loud".into()));
    }

    #[test]
    fn test_upstream_must_be_an_origin() {
        assert!(validate_upstream("http://sports:8080").is_ok());
        assert!(validate_upstream("http://sports:8080/").is_ok());
        assert!(validate_upstream("http://sports:8080/api").is_err());
        assert!(validate_upstream("http://sports:8080/?a=b").is_err());
        assert!(validate_upstream("sports:8080").is_err());
    }
}
