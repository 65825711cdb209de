//! API firewall.
//!
//! An inline policy-enforcement proxy for a single upstream service.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────────────┐
//!                       │                     FIREWALL                          │
//!                       │                                                       │
//!     Client Request    │  ┌─────────┐    ┌────────────┐    ┌──────────────┐   │
//!     ──────────────────┼─▶│  http   │───▶│ forwarding │───▶│   upstream   │───┼──▶ Upstream
//!                       │  │ handler │    │ transport  │    │  transport   │   │    Service
//!                       │  └─────────┘    └─────┬──────┘    └──────┬───────┘   │
//!                       │       ▲               │ Reject → 403     │           │
//!                       │       │               ▼                  ▼           │
//!     Client Response   │  ┌─────────┐    ┌────────────┐    ┌──────────────┐   │
//!     ◀─────────────────┼──│response │◀───│  request   │    │   response   │◀──┼─── Upstream
//!                       │  │ builder │◀───│ inspector  │    │  inspector   │   │    Response
//!                       │  └─────────┘    └────────────┘    └──────────────┘   │
//!                       │                                                       │
//!                       │       RuleTable (immutable, shared by inspectors)     │
//!                       └──────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::Parser;
use tokio::net::TcpListener;

use api_firewall::config::{load_rules, parse_config, validate_config, ConfigError, FirewallConfig};
use api_firewall::lifecycle::{signals, Shutdown};
use api_firewall::observability::{logging, metrics};
use api_firewall::FirewallServer;

#[derive(Parser)]
#[command(name = "api-firewall")]
#[command(about = "Inline HTTP policy-enforcement proxy", long_about = None)]
struct Cli {
    /// Base URL of the protected service
    #[arg(long = "service-addr")]
    service_addr: Option<String>,

    /// Path to the YAML rule file
    #[arg(long)]
    conf: Option<PathBuf>,

    /// Address to listen on
    #[arg(long)]
    addr: Option<String>,

    /// Optional TOML settings file
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    /// Settings file (or defaults) with flags applied on top, then validated.
    fn resolve(&self) -> Result<FirewallConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => parse_config(path)?,
            None => FirewallConfig::default(),
        };

        if let Some(service_addr) = &self.service_addr {
            config.upstream.base_url = service_addr.clone();
        }
        if let Some(conf) = &self.conf {
            config.rules.path = conf.to_string_lossy().into_owned();
        }
        if let Some(addr) = &self.addr {
            config.listener.bind_address = addr.clone();
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.resolve()?;

    logging::init_logging(&config.observability);

    tracing::info!("api-firewall v{} starting", env!("CARGO_PKG_VERSION"));

    let rules = load_rules(Path::new(&config.rules.path))?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        rules_path = %config.rules.path,
        restricted_endpoints = rules.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    for endpoint in rules.endpoints() {
        tracing::debug!(endpoint, "Restricted endpoint");
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = FirewallServer::new(config, rules)?;

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(&shutdown);

    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn settings_file(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("api-firewall-cli-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_flags_replace_invalid_file_values() {
        let path = settings_file(
            "override.toml",
            "[upstream]\nbase_url = \"ftp://x\"\n[listener]\nbind_address = \"nowhere\"\n",
        );

        let cli = Cli::parse_from([
            "api-firewall",
            "--config",
            path.to_str().unwrap(),
            "--service-addr",
            "http://ok:80",
            "--addr",
            "127.0.0.1:8081",
        ]);
        let config = cli.resolve().unwrap();
        assert_eq!(config.upstream.base_url, "http://ok:80");
        assert_eq!(config.listener.bind_address, "127.0.0.1:8081");
    }

    #[test]
    fn test_invalid_file_value_without_flag_is_rejected() {
        let path = settings_file("invalid.toml", "[upstream]\nbase_url = \"ftp://x\"\n");

        let cli = Cli::parse_from(["api-firewall", "--config", path.to_str().unwrap()]);
        assert!(matches!(cli.resolve(), Err(ConfigError::Validation(ref e)) if e.len() == 1));
    }
}
