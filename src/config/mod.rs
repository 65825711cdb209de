//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! settings file (TOML, optional)        rule file (YAML)
//!     → loader.rs (parse)                   → loader.rs (parse, strict)
//!     → CLI overrides (main.rs)             → rules::RuleTable (compiled)
//!     → validation.rs (semantic checks)
//!     → FirewallConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - All settings have defaults to allow running with flags only
//! - Any load or validation error stops startup

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_rules, parse_config, parse_rules, ConfigError};
pub use schema::{
    FirewallConfig, ListenerConfig, ObservabilityConfig, RulesConfig, TimeoutConfig,
    UpstreamConfig,
};
pub use validation::{validate_config, ValidationError};
