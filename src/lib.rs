//! Airtime sales desk for a radio station: customers, products, packages,
//! priced orders and printable quotations.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod pricing;
pub mod quotation;
pub mod routes;
pub mod store;

use std::sync::Arc;

use axum::Router;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};

use crate::cache::AppCache;
use crate::config::Config;
use crate::store::Store;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub cache: AppCache,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Store, config: Config) -> Self {
        Self {
            store,
            cache: AppCache::new(),
            config: Arc::new(config),
        }
    }
}

/// Build the application router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::router())
        .merge(pricing::router())
        .nest_service("/static", ServeDir::new("static"))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
