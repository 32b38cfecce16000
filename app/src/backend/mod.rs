//! # Backend Module
//!
//! Contains all non-UI logic for the rental estimator.
//!
//! ## Architecture
//!
//! ```text
//! Storefront page (estimate form, contact form)
//!     ↓
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (pricing, presentation, links, selection cache)
//!     ↓
//! Storage Layer (config file, key-value store)
//! ```
//!
//! The REST layer is a loopback bridge for the page. It runs the same pure
//! estimator the page would run itself and is not an authoritative quote.

pub mod storage;
pub mod domain;
pub mod io;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use log::info;
use shared::EstimatorConfig;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::backend::domain::{
    ConfigService, EstimateViewService, EstimatorService, MessagingService, SelectionService,
};
use crate::backend::storage::{
    ConfigRepository, FileConnection, FileKeyValueRepository, KeyValueStore,
};

pub const DEFAULT_UI_ORIGIN: &str = "http://localhost:8080";

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub estimator_service: EstimatorService,
    pub estimate_view_service: EstimateViewService,
    pub messaging_service: MessagingService,
    pub selection_service: SelectionService<dyn KeyValueStore>,
}

impl AppState {
    /// Wire every service from a validated configuration and a selection store
    pub fn new(config: EstimatorConfig, store: Arc<dyn KeyValueStore>) -> Self {
        let estimate_view_service = EstimateViewService::new(&config);
        let messaging_service = MessagingService::new(&config);
        let estimator_service = EstimatorService::new(Arc::new(config));

        Self {
            estimator_service,
            estimate_view_service,
            messaging_service,
            selection_service: SelectionService::new(store),
        }
    }
}

/// Initialize the backend with all required services, storing data under `connection`
pub fn initialize_backend(connection: FileConnection) -> Result<AppState> {
    info!("Loading estimator config");
    let config_service = ConfigService::new(Arc::new(ConfigRepository::new(connection.clone())));
    let config = config_service.load()?;

    info!("Setting up selection cache");
    let store: Arc<dyn KeyValueStore> = Arc::new(FileKeyValueRepository::new(connection)?);

    info!("Setting up application state");
    Ok(AppState::new(config, store))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, ui_origin: &str) -> Result<Router> {
    let origin = ui_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid UI origin: {}", ui_origin))?;

    // CORS setup to allow the storefront page to make requests
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Ok(Router::new()
        .nest("/api/config", io::rest::config_apis::router())
        .nest("/api/estimate", io::rest::estimate_apis::router())
        .nest("/api/selection", io::rest::selection_apis::router())
        .nest("/api/messaging", io::rest::messaging_apis::router())
        .nest("/api/log", io::rest::logging_apis::router())
        .layer(cors)
        .with_state(app_state))
}
