//! Printable quotation documents.
//!
//! A quotation lists a customer's confirmed orders exactly as they were
//! priced when placed; nothing here calls the pricing engine.

pub mod qr;

use std::sync::Arc;

use chrono::NaiveDate;

use crate::error::{AppError, Result};
use crate::models::{Customer, Order, OrderTotals};
use crate::pricing::format_baht;
use crate::AppState;

/// Rows printed before the summary, padded with blanks.
pub const MIN_TABLE_ROWS: usize = 5;

/// A customer's orders and their totals
#[derive(Debug, Clone)]
pub struct QuotationData {
    pub customer: Customer,
    pub orders: Vec<Order>,
    pub totals: OrderTotals,
}

/// Load a customer's quotation rollup, from cache when possible.
///
/// The store read lock is held until the rollup is cached, so a write that
/// lands meanwhile waits and its invalidation removes the entry afterwards.
pub async fn load_quotation(state: &AppState, customer_id: &str) -> Result<Arc<QuotationData>> {
    if let Some(cached) = state.cache.quotations.get(customer_id).await {
        tracing::debug!("Cache HIT for quotation: {}", customer_id);
        return Ok(cached);
    }
    tracing::debug!("Cache MISS for quotation: {}", customer_id);

    let records = state.store.read_guard().await;
    let customer = records
        .customer(customer_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("customer {}", customer_id)))?;
    let data = Arc::new(QuotationData {
        customer,
        orders: records.orders_for(Some(customer_id)),
        totals: records.totals(Some(customer_id)),
    });

    state
        .cache
        .quotations
        .insert(customer_id.to_string(), data.clone())
        .await;
    drop(records);
    Ok(data)
}

/// Reference printed on the document and encoded in its QR code.
pub fn quotation_reference(customer_id: &str, issue_date: NaiveDate) -> String {
    format!("QT-{}-{}", customer_id, issue_date.format("%Y%m%d"))
}

/// One printed order line, values preformatted for the template
#[derive(Debug, Clone, PartialEq)]
pub struct QuotationRow {
    pub product_name: String,
    pub note: String,
    pub total_days: u32,
    pub date_range: String,
    pub times_per_day: u32,
    pub total_spots: u32,
    pub amount: String,
}

impl From<&Order> for QuotationRow {
    fn from(order: &Order) -> Self {
        Self {
            product_name: order.product_name.clone(),
            note: order.note.clone(),
            total_days: order.pricing.total_days,
            date_range: format!(
                "{} - {}",
                order.start_date.format("%-d %b %y"),
                order.end_date.format("%-d %b %y")
            ),
            times_per_day: order.pricing.times_per_day,
            total_spots: order
                .pricing
                .total_days
                .saturating_mul(order.pricing.times_per_day),
            amount: format_baht(order.pricing.price_after_discount),
        }
    }
}

/// Summary block at the foot of the quotation
#[derive(Debug, Clone, PartialEq)]
pub struct QuotationSummary {
    pub before_vat: String,
    pub vat: String,
    pub total: String,
}

impl From<&OrderTotals> for QuotationSummary {
    fn from(t: &OrderTotals) -> Self {
        Self {
            before_vat: format_baht(t.before_vat),
            vat: format_baht(t.vat),
            total: format_baht(t.net_total),
        }
    }
}

/// Order rows plus the number of blank rows to pad the table with.
pub fn table_rows(orders: &[Order]) -> (Vec<QuotationRow>, usize) {
    let rows: Vec<QuotationRow> = orders.iter().map(QuotationRow::from).collect();
    let filler = MIN_TABLE_ROWS.saturating_sub(rows.len());
    (rows, filler)
}

/// Text encoded in the quotation QR code.
pub fn qr_payload(reference: &str, totals: &OrderTotals) -> String {
    format!("{}|{}", reference, format_baht(totals.net_total).replace(',', ""))
}

/// QR image for a payload, from cache when possible.
pub async fn qr_image(state: &AppState, payload: &str) -> Result<Arc<String>> {
    if let Some(cached) = state.cache.qr_codes.get(payload).await {
        return Ok(cached);
    }
    let uri = Arc::new(qr::qr_data_uri(payload)?);
    state
        .cache
        .qr_codes
        .insert(payload.to_string(), uri.clone())
        .await;
    Ok(uri)
}
