//! HTTP route handlers

pub mod catalog;
pub mod customers;
pub mod data;
pub mod orders;
pub mod quotation;

use axum::{
    extract::State,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Serialize;

use crate::cache::CacheStats;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/customers", get(customers::list).post(customers::create))
        .route(
            "/api/customers/:id",
            put(customers::update).delete(customers::remove),
        )
        .route("/api/products", get(catalog::list_products).post(catalog::create_product))
        .route("/api/products/:id", delete(catalog::remove_product))
        .route("/api/packages", get(catalog::list_packages).post(catalog::create_package))
        .route("/api/packages/:id", delete(catalog::remove_package))
        .route("/api/orders", get(orders::list).post(orders::create))
        .route("/api/orders/totals", get(orders::totals))
        .route("/api/orders/:id", delete(orders::remove))
        .route("/api/data/save", post(data::save))
        .route("/api/data/export", get(data::export))
        .route("/api/data/import", post(data::import))
        .route("/api/data", delete(data::clear))
        .route("/quotation", get(quotation::index))
        .route("/quotation/:customer_id", get(quotation::document))
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    unsaved_changes: bool,
    cache: CacheStats,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        unsaved_changes: state.store.is_dirty(),
        cache: state.cache.stats(),
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use rust_decimal::Decimal;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::store::Store;
    use crate::{build_router, AppState};

    pub fn app() -> (Router, AppState, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::with_data(dir.path().join("data.json"), Default::default());
        let state = AppState::new(store, Config::default());
        (build_router(state.clone()), state, dir)
    }

    /// Parse a decimal serialized as a JSON string.
    pub fn decimal(value: &Value) -> Decimal {
        value.as_str().and_then(|s| s.parse().ok()).unwrap_or_else(|| panic!("not a decimal: {}", value))
    }

    pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = send_raw(app, method, uri, body).await;
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn send_raw(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }
}
