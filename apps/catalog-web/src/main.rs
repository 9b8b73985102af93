//! Catalog web server - product catalog over a remote REST API

use domain_catalog::{CatalogService, HttpCatalogClient};
use tracing::info;

mod api;
mod config;
mod openapi;
mod telemetry;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    telemetry::install_color_eyre();

    let config = Config::from_env()?;
    telemetry::init_tracing(&config.environment);

    info!("Catalog upstream: {}", config.upstream.base_url);
    if config.upstream.accept_invalid_certs {
        tracing::warn!("Upstream TLS certificate verification is disabled");
    }

    let client = HttpCatalogClient::new(&config.upstream)?;
    let service = CatalogService::new(client);
    let app = api::routes(service, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.address()).await?;
    info!("Starting catalog web server on {}", config.address());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Catalog web server shutdown complete");
    Ok(())
}

/// Resolve on Ctrl-C or SIGTERM so in-flight requests can drain.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl-C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
