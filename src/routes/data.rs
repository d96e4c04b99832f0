//! Snapshot save, backup and restore handlers

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub last_save: DateTime<Utc>,
}

/// Manual save.
pub async fn save(State(state): State<AppState>) -> Result<Json<SaveResponse>> {
    let last_save = state.store.save().await?;
    tracing::info!("Snapshot saved to {}", state.store.path().display());
    Ok(Json(SaveResponse { last_save }))
}

/// Download the whole snapshot as `MCOT_Backup_YYYY-MM-DD.json`.
pub async fn export(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let json = state.store.export().await?;
    let filename = backup_filename(Utc::now());
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        json,
    ))
}

/// Replace all records with an uploaded backup. Nothing changes if the
/// upload does not parse.
pub async fn import(State(state): State<AppState>, body: String) -> Result<Json<SaveResponse>> {
    let last_save = state.store.import(&body).await?;
    state.cache.invalidate_all();
    Ok(Json(SaveResponse { last_save }))
}

pub async fn clear(State(state): State<AppState>) -> Result<StatusCode> {
    state.store.clear().await?;
    state.cache.invalidate_all();
    Ok(StatusCode::NO_CONTENT)
}

fn backup_filename(now: DateTime<Utc>) -> String {
    format!("MCOT_Backup_{}.json", now.format("%Y-%m-%d"))
}
