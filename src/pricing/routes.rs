//! HTTP routes for the pricing engine.

use axum::{extract::State, routing::{get, post}, Json, Router};

use super::requests::{EndDateRequest, QuoteRequest};
use super::responses::{EndDateResponse, PricingResultResponse, QuotePreviewResponse};
use super::schedule::{expand_end_date, SlotPeriod, TIME_SLOTS};
use super::services;
use crate::error::Result;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/pricing/quote", post(quote))
        .route("/api/pricing/end-date", post(end_date))
        .route("/api/pricing/time-slots", get(time_slots))
}

/// Re-price the order form; called on every change to any input.
async fn quote(
    State(state): State<AppState>,
    Json(req): Json<QuoteRequest>,
) -> Result<Json<QuotePreviewResponse>> {
    let draft = state
        .store
        .read(|data| services::preview_quote(data, &req))
        .await?;

    Ok(Json(QuotePreviewResponse {
        computable: draft.result.is_some(),
        end_date: draft.end_date,
        customer_category: draft.customer_category,
        item_name: draft.item.map(|i| i.name),
        result: draft.result.as_ref().map(PricingResultResponse::from),
    }))
}

async fn end_date(Json(req): Json<EndDateRequest>) -> Json<EndDateResponse> {
    Json(EndDateResponse {
        start_date: req.start_date,
        end_date: expand_end_date(req.start_date, req.duration),
    })
}

async fn time_slots() -> Json<&'static [SlotPeriod]> {
    Json(&TIME_SLOTS)
}
