use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::sync::Arc;

use blagent_relay::RelayClient;

mod cli;
mod config;
mod web;

use cli::Cli;
use config::AppConfig;
use web::server::{WebServer, WebServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env.local / .env if present
    dotenvy::from_filename(".env.local").ok();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load(&cli)?;

    let relay = config
        .relay_config()
        .map(|relay_config| Arc::new(RelayClient::new(relay_config).with_verbose(cli.verbose)));

    if relay.is_none() {
        eprintln!(
            "{} BAILIAN_API_KEY / BAILIAN_APP_ID not set; /api/chat will answer with a configuration error",
            "⚠️".yellow()
        );
    }

    WebServer::new(WebServerConfig {
        bind_addr: config.bind_addr,
        web_dir: config.web_dir,
        relay,
    })
    .start()
    .await
}
