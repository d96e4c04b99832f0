//! Order-entry workflow around the pricing engine.
//!
//! Resolves the catalogue item, customer category and schedule from the
//! stored records, then hands an explicit `PricingInput` to the pure
//! calculator. Confirmed orders carry the result as computed here.

use axum::http::StatusCode;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use super::calculators::calculate_pricing;
use super::models::{CustomerCategory, PricingInput, PricingResult};
use super::requests::QuoteRequest;
use super::schedule::{distinct_slots, expand_end_date, is_known_slot};
use crate::models::{new_id, Order, OrderKind, ProductType, SystemData};

/// Pricing workflow error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("A customer must be selected to confirm an order")]
    MissingCustomer,

    #[error("No customer found with id {0}")]
    UnknownCustomer(String),

    #[error("No {kind:?} item found with id {id}")]
    UnknownItem { kind: OrderKind, id: String },

    #[error("Unknown time slot '{0}'")]
    UnknownSlot(String),

    #[error("Order cannot be priced yet: select an item and a valid date range")]
    NotComputable,
}

impl PricingError {
    pub fn status(&self) -> StatusCode {
        match self {
            PricingError::UnknownCustomer(_) | PricingError::UnknownItem { .. } => {
                StatusCode::NOT_FOUND
            }
            PricingError::MissingCustomer
            | PricingError::UnknownSlot(_)
            | PricingError::NotComputable => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

/// The priced catalogue entry an order refers to.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedItem {
    pub id: String,
    pub name: String,
    pub unit_price: Decimal,
}

/// Find an item of the given order kind.
///
/// Produce orders sell airtime and online products, Production orders sell
/// production products, Package orders sell packages at their total price.
pub fn resolve_item(
    data: &SystemData,
    kind: OrderKind,
    item_id: &str,
) -> Result<SelectedItem, PricingError> {
    let found = match kind {
        OrderKind::Package => data.package(item_id).map(|p| SelectedItem {
            id: p.id.clone(),
            name: p.name.clone(),
            unit_price: p.total_price,
        }),
        OrderKind::Produce | OrderKind::Production => data
            .product(item_id)
            .filter(|p| (p.product_type == ProductType::Production) == (kind == OrderKind::Production))
            .map(|p| SelectedItem {
                id: p.id.clone(),
                name: p.name.clone(),
                unit_price: p.price,
            }),
    };

    found.ok_or_else(|| PricingError::UnknownItem {
        kind,
        id: item_id.to_string(),
    })
}

/// A quote request resolved against the records and priced.
#[derive(Debug, Clone)]
pub struct QuoteDraft {
    pub customer_category: CustomerCategory,
    pub item: Option<SelectedItem>,
    pub time_slots: Vec<String>,
    pub end_date: Option<NaiveDate>,
    pub input: PricingInput,
    pub result: Option<PricingResult>,
}

/// Price the order form as it stands.
///
/// Blank selections leave the draft uncomputable; ids that do not exist are
/// errors. Without a customer the private-sector tiers apply.
pub fn preview_quote(data: &SystemData, req: &QuoteRequest) -> Result<QuoteDraft, PricingError> {
    let customer_category = match req.customer_id.as_deref().filter(|id| !id.is_empty()) {
        Some(id) => {
            data.customer(id)
                .ok_or_else(|| PricingError::UnknownCustomer(id.to_string()))?
                .category
        }
        None => CustomerCategory::default(),
    };

    let item = match req.item_id.as_deref().filter(|id| !id.is_empty()) {
        Some(id) => Some(resolve_item(data, req.order_type, id)?),
        None => None,
    };

    let time_slots = distinct_slots(&req.time_slots);
    if let Some(unknown) = time_slots.iter().find(|s| !is_known_slot(s)) {
        return Err(PricingError::UnknownSlot(unknown.clone()));
    }

    let end_date = req
        .start_date
        .and_then(|start| expand_end_date(start, req.duration));

    let input = PricingInput {
        unit_price: item.as_ref().map(|i| i.unit_price),
        slot_count: time_slots.len() as u32,
        start_date: req.start_date,
        end_date,
        active_weekdays: req.days_of_week,
        customer_category,
        payment_timing: req.payment_type,
    };
    let result = calculate_pricing(&input);

    tracing::debug!(
        item = ?item.as_ref().map(|i| &i.id),
        computable = result.is_some(),
        net_total = ?result.as_ref().map(|r| r.net_total),
        "Quote recalculated"
    );

    Ok(QuoteDraft {
        customer_category,
        item,
        time_slots,
        end_date,
        input,
        result,
    })
}

/// Confirm an order: price it once and append it to the records.
pub fn place_order(
    data: &mut SystemData,
    req: &QuoteRequest,
    now: DateTime<Utc>,
) -> Result<Order, PricingError> {
    let customer_id = req
        .customer_id
        .clone()
        .filter(|id| !id.is_empty())
        .ok_or(PricingError::MissingCustomer)?;

    let draft = preview_quote(data, req)?;
    let (item, pricing, start_date, end_date) = match (
        draft.item,
        draft.result,
        draft.input.start_date,
        draft.end_date,
    ) {
        (Some(item), Some(pricing), Some(start), Some(end)) => (item, pricing, start, end),
        _ => return Err(PricingError::NotComputable),
    };

    let order = Order {
        id: new_id("ORD"),
        customer_id,
        kind: req.order_type,
        product_id: item.id,
        product_name: item.name,
        unit_price: item.unit_price,
        time_slots: draft.time_slots,
        start_date,
        end_date,
        days_of_week: req.days_of_week,
        payment_timing: req.payment_type,
        note: req.note.trim().to_string(),
        created: now,
        pricing,
    };

    tracing::info!(
        order_id = %order.id,
        customer_id = %order.customer_id,
        net_total = %order.pricing.net_total,
        "Order placed"
    );

    data.add_order(order.clone());
    Ok(order)
}
