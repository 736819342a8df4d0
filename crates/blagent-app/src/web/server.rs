use anyhow::Result;
use colored::Colorize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use blagent_relay::RelayClient;

use crate::web::routes::{self, AppState};

/// Web server configuration
pub struct WebServerConfig {
    pub bind_addr: SocketAddr,
    pub web_dir: Option<PathBuf>,
    pub relay: Option<Arc<RelayClient>>,
}

/// Web server instance
pub struct WebServer {
    config: WebServerConfig,
}

impl WebServer {
    pub fn new(config: WebServerConfig) -> Self {
        Self { config }
    }

    /// Start the web server
    pub async fn start(self) -> Result<()> {
        let state = AppState {
            relay: self.config.relay.clone(),
        };

        let mut app = routes::create_router(state);

        // Permissive CORS for development
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);

        // Serve prebuilt static assets if a web_dir is provided
        if let Some(web_dir) = &self.config.web_dir {
            if web_dir.exists() {
                println!("Serving static files from: {}", web_dir.display());
                app = app.nest_service("/static", ServeDir::new(web_dir));
            }
        }

        println!(
            "{} Chat server starting on http://{}",
            "🌐".blue(),
            self.config.bind_addr
        );
        println!("   Chat endpoint: http://{}/api/chat", self.config.bind_addr);
        println!("   Health check: http://{}/health", self.config.bind_addr);

        let listener = tokio::net::TcpListener::bind(&self.config.bind_addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
