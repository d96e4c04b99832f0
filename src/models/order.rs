//! Confirmed airtime orders and their rollups

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::{DaysOfWeek, PaymentTiming, PricingResult};

/// What kind of catalogue entry an order sells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderKind {
    /// Airtime or online products.
    #[default]
    Produce,
    Package,
    /// Spot production work.
    Production,
}

/// A confirmed order. The pricing breakdown is stored as computed at
/// confirmation time and never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub customer_id: String,
    #[serde(rename = "productType")]
    pub kind: OrderKind,
    pub product_id: String,
    pub product_name: String,
    pub unit_price: Decimal,
    #[serde(default)]
    pub time_slots: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days_of_week: DaysOfWeek,
    #[serde(rename = "paymentType")]
    pub payment_timing: PaymentTiming,
    #[serde(default)]
    pub note: String,
    pub created: DateTime<Utc>,
    #[serde(flatten)]
    pub pricing: PricingResult,
}

/// Additive totals over a set of orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct OrderTotals {
    pub order_count: usize,
    #[serde(with = "rust_decimal::serde::str")]
    pub base_total: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub discount_total: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub before_vat: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub vat: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub net_total: Decimal,
}

impl OrderTotals {
    /// Sum the stored pricing of each order.
    pub fn from_orders<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Self {
        orders.into_iter().fold(Self::default(), |acc, order| {
            let p = &order.pricing;
            OrderTotals {
                order_count: acc.order_count + 1,
                base_total: acc.base_total + p.base_total,
                discount_total: acc.discount_total + p.total_discount_amount,
                before_vat: acc.before_vat + p.price_after_discount,
                vat: acc.vat + p.vat_amount,
                net_total: acc.net_total + p.net_total,
            }
        })
    }
}
