pub mod client;
pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header::InvalidHeaderValue, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{
    config::Config,
    handlers::{applications, stats},
    services::storage::{ApplicationStore, JsonFileStore},
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ApplicationStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ApplicationStore>) -> Self {
        Self { store }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(JsonFileStore::new(config.data_file.clone())))
    }
}

pub fn cors_layer(allowed_origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    let origin = if allowed_origin == "*" {
        HeaderValue::from_static("*")
    } else {
        allowed_origin.parse::<HeaderValue>()?
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([axum::http::header::CONTENT_TYPE]))
}

pub fn build_router(state: AppState, config: &Config) -> Result<Router, InvalidHeaderValue> {
    let api_routes = Router::new()
        .route(
            "/applications",
            get(applications::get_applications).post(applications::create_application),
        )
        .route(
            "/applications/:id",
            axum::routing::put(applications::update_application)
                .delete(applications::delete_application),
        )
        .route("/stats", get(stats::get_stats));

    let mut app = Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/api", api_routes);

    if let Some(static_dir) = &config.static_dir {
        app = app.fallback_service(ServeDir::new(static_dir));
    }

    Ok(app
        .layer(cors_layer(&config.cors_allowed_origin)?)
        .layer(DefaultBodyLimit::max(config.max_request_body_bytes()))
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
