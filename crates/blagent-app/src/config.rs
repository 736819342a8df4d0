use anyhow::{Context, Result};
use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use blagent_relay::RelayConfig;

use crate::cli::Cli;

pub const DEFAULT_PORT: u16 = 3000;

/// Application configuration assembled from CLI flags and the environment.
///
/// Credentials are optional on purpose: the server boots without them and
/// `/api/chat` reports a configuration error, so the UI and health check
/// still work in an unconfigured deployment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub api_key: Option<String>,
    pub app_id: Option<String>,
    pub web_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn load(cli: &Cli) -> Result<Self> {
        let host: IpAddr = cli
            .host
            .parse()
            .with_context(|| format!("invalid bind address: {}", cli.host))?;
        let port = cli.port.unwrap_or(DEFAULT_PORT);

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            api_key: non_empty_env("BAILIAN_API_KEY"),
            app_id: non_empty_env("BAILIAN_APP_ID"),
            web_dir: cli.web_dir.clone(),
        })
    }

    /// Relay configuration, if both credentials are present.
    pub fn relay_config(&self) -> Option<RelayConfig> {
        match (&self.api_key, &self.app_id) {
            (Some(api_key), Some(app_id)) => Some(RelayConfig::new(api_key, app_id)),
            _ => None,
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relay_config_requires_both_credentials() {
        let mut config = AppConfig {
            bind_addr: "127.0.0.1:3000".parse().unwrap(),
            api_key: Some("key".to_string()),
            app_id: None,
            web_dir: None,
        };
        assert!(config.relay_config().is_none());

        config.app_id = Some("app".to_string());
        let relay = config.relay_config().unwrap();
        assert_eq!(relay.api_key, "key");
        assert_eq!(relay.endpoints.len(), 3);
    }
}
