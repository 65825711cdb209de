//! Inline HTTP policy-enforcement proxy.
//!
//! Sits in front of a single upstream service. Every request is checked
//! against the rules for its endpoint before it is forwarded, and every
//! upstream response is checked again before it is returned.

pub mod config;
pub mod error;
pub mod http;
pub mod inspect;
pub mod lifecycle;
pub mod observability;
pub mod rules;
pub mod transport;

pub use config::schema::FirewallConfig;
pub use error::FirewallError;
pub use http::FirewallServer;
pub use lifecycle::Shutdown;
pub use rules::RuleTable;
