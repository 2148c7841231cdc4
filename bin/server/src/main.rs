use actix_web::{web, App, HttpServer};
use inspection_server::config::ServerConfig;
use inspection_server::configure;
use inspection_server::state::AppState;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing with env filter
    // Filter out actix-server worker shutdown messages
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(
                    "info,actix_server::worker=warn,actix_server::accept=warn",
                )
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        "Starting inspection server (PID: {})",
        std::process::id()
    );

    let config = ServerConfig::load().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;
    info!(
        "Upload limits: max_file_size={} bytes, max_total_size={} bytes",
        config.limits.max_file_size, config.limits.max_total_size
    );

    let state = web::Data::new(AppState::new(config.limits));
    let bind_address = config.bind_address();

    info!("Starting server on http://{}", bind_address);

    let server = HttpServer::new(move || App::new().configure(configure(state.clone())))
        .bind(&bind_address)
        .map_err(|e| {
            error!("Failed to bind to {}: {}", bind_address, e);
            e
        })?;

    info!("Server bound successfully to http://{}", bind_address);

    server.run().await
}
