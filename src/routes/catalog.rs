//! Product and package route handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::error::Result;
use crate::models::{new_id, Package, PackageForm, Product, ProductForm, ProductType};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    #[serde(default, rename = "type")]
    pub product_type: Option<ProductType>,
}

pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Json<Vec<Product>> {
    Json(state.store.read(|d| d.products_of_type(query.product_type)).await)
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(form): Json<ProductForm>,
) -> Result<(StatusCode, Json<Product>)> {
    let id = new_id(form.product_type.id_prefix());
    let product = form.into_product(id, Utc::now())?;
    state.store.update(|d| d.add_product(product.clone())).await;
    tracing::info!("Product added: {} at {}", product.name, product.price);
    Ok((StatusCode::CREATED, Json(product)))
}

/// Packages keep their own copy of the product, so removal does not touch them.
pub async fn remove_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.store.try_update(|d| d.remove_product(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_packages(State(state): State<AppState>) -> Json<Vec<Package>> {
    Json(state.store.read(|d| d.packages.clone()).await)
}

pub async fn create_package(
    State(state): State<AppState>,
    Json(form): Json<PackageForm>,
) -> Result<(StatusCode, Json<Package>)> {
    let package = state
        .store
        .try_update(|d| {
            let package = form.into_package(&d.products, new_id("PKG"), Utc::now())?;
            d.add_package(package.clone());
            Ok::<_, crate::error::AppError>(package)
        })
        .await?;
    tracing::info!("Package added: {} at {}", package.name, package.total_price);
    Ok((StatusCode::CREATED, Json(package)))
}

pub async fn remove_package(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.store.try_update(|d| d.remove_package(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
