//! Customer route handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::error::Result;
use crate::models::{new_id, Customer, CustomerForm};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CustomerQuery {
    #[serde(default)]
    pub search: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<CustomerQuery>,
) -> Json<Vec<Customer>> {
    let customers = state
        .store
        .read(|d| d.search_customers(query.search.as_deref()))
        .await;
    Json(customers)
}

pub async fn create(
    State(state): State<AppState>,
    Json(form): Json<CustomerForm>,
) -> Result<(StatusCode, Json<Customer>)> {
    let customer = form.into_customer(new_id("CUST"), Utc::now())?;
    state.store.update(|d| d.add_customer(customer.clone())).await;
    tracing::info!("Customer added: {} ({})", customer.company, customer.id);
    Ok((StatusCode::CREATED, Json(customer)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<CustomerForm>,
) -> Result<Json<Customer>> {
    let customer = state.store.try_update(|d| d.update_customer(&id, form)).await?;
    state.cache.invalidate_customer(&id).await;
    Ok(Json(customer))
}

pub async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    let removed = state.store.try_update(|d| d.remove_customer(&id)).await?;
    state.cache.invalidate_customer(&id).await;
    tracing::info!("Customer removed: {} ({})", removed.company, removed.id);
    Ok(StatusCode::NO_CONTENT)
}
