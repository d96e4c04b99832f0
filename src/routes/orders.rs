//! Order route handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::error::Result;
use crate::models::{Order, OrderTotals};
use crate::pricing::{place_order, requests::QuoteRequest};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct OrderQuery {
    #[serde(default)]
    pub customer_id: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<OrderQuery>,
) -> Json<Vec<Order>> {
    Json(
        state
            .store
            .read(|d| d.orders_for(query.customer_id.as_deref()))
            .await,
    )
}

/// Campaign rollup over all orders, or one customer's orders.
pub async fn totals(
    State(state): State<AppState>,
    Query(query): Query<OrderQuery>,
) -> Json<OrderTotals> {
    Json(
        state
            .store
            .read(|d| d.totals(query.customer_id.as_deref()))
            .await,
    )
}

/// Confirm the order form; the pricing computed here is stored as-is.
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<QuoteRequest>,
) -> Result<(StatusCode, Json<Order>)> {
    let order = state
        .store
        .try_update(|d| place_order(d, &req, Utc::now()))
        .await?;
    state.cache.invalidate_customer(&order.customer_id).await;
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    let removed = state.store.try_update(|d| d.remove_order(&id)).await?;
    state.cache.invalidate_customer(&removed.customer_id).await;
    tracing::info!("Order removed: {}", removed.id);
    Ok(StatusCode::NO_CONTENT)
}
