mod models;
mod handlers;
mod routes;
mod docs;
mod websocket;
mod config;
mod services;
mod ws;

use chrono::{DateTime, Utc};
use config::Config;
use routes::create_app;
use services::shared_workspace_service::SharedWorkspaceService;
use std::{panic, sync::Arc};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use ws::hub::RelayHub;

/// Shared state behind every route and socket
pub struct AppState {
    pub config: Config,
    pub hub: RelayHub,
    pub shared_workspaces: SharedWorkspaceService,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            hub: RelayHub::with_outbox_capacity(config.outbox_capacity),
            config,
            shared_workspaces: SharedWorkspaceService::new(),
            started_at: Utc::now(),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {

    // Set panic hook for better error messages
    panic::set_hook(Box::new(|info| {
        eprintln!("PANIC: {info}");
    }));

    // Load configuration before logging so LOG_LEVEL can drive the filter
    let loaded = Config::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!("collab_relay={},tower_http=debug,{}", config.log_level, config.log_level).into()
        }))
        .init();

    match loaded {
        Ok(_) => info!("✅ Configuration loaded successfully"),
        Err(e) => {
            error!("❌ Failed to load configuration: {}", e);
            warn!("Using default configuration");
        }
    }
    info!("Starting {} ({})", config.service_name, config.environment);

    let address = config.server_address();
    let app = create_app(Arc::new(AppState::new(config)));

    let listener = match tokio::net::TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", address, e);
            std::process::exit(1);
        }
    };

    info!("🚀 Collaboration server running on http://{}", address);
    info!("📡 WebSocket server ready for connections at ws://{}/ws", address);
    info!("📚 Swagger UI available at http://{}/swagger", address);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
    }
    info!("Server stopped, all rooms and presence state dropped");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
