use std::net::SocketAddr;

use anyhow::Context;
use rental_estimator::backend::{
    create_router, initialize_backend, storage::FileConnection, DEFAULT_UI_ORIGIN,
};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

const ADDR_ENV: &str = "RENTAL_ESTIMATOR_ADDR";
const UI_ORIGIN_ENV: &str = "RENTAL_ESTIMATOR_UI_ORIGIN";
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; `log` records from the backend are bridged in
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Setting up data directory");
    let connection = FileConnection::new_default()?;

    let app_state = initialize_backend(connection)?;

    let ui_origin =
        std::env::var(UI_ORIGIN_ENV).unwrap_or_else(|_| DEFAULT_UI_ORIGIN.to_string());
    let app = create_router(app_state, &ui_origin)?;

    let addr_str = std::env::var(ADDR_ENV).unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let addr: SocketAddr = addr_str
        .parse()
        .with_context(|| format!("Invalid {} value: {}", ADDR_ENV, addr_str))?;

    info!("Starting server on {} (UI origin {})", addr, ui_origin);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
