use std::net::SocketAddr;

use anyhow::Context;
use skyfare_api::{app, AppState};
use skyfare_provider::{app_config::Config, FlightService};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load config")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log.level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting {} v{} on port {}", config.app.name, config.app.version, config.server.port);

    let flights = FlightService::from_config(&config.amadeus, &config.pool);
    let app_state = AppState::new(flights)
        .with_info(config.app.clone())
        .with_cors(config.cors.clone());

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
