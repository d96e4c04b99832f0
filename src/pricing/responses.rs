//! Response DTOs for pricing API endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::calculators::round_money;
use super::models::{CustomerCategory, PricingResult};

/// Money value for JSON responses
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: &'static str,
}

impl MoneyResponse {
    pub fn baht(amount: Decimal) -> Self {
        Self {
            amount: round_money(amount, 2),
            currency: "THB",
        }
    }
}

/// Pricing breakdown as shown on the order form
#[derive(Debug, Serialize)]
pub struct PricingResultResponse {
    pub total_days: u32,
    pub times_per_day: u32,
    pub total_spots: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub campaign_months: Decimal,
    pub base_total: MoneyResponse,
    pub condition_discount_percent: u32,
    pub condition_discount: MoneyResponse,
    pub payment_discount_percent: u32,
    pub payment_discount: MoneyResponse,
    pub total_discount: MoneyResponse,
    pub price_after_discount: MoneyResponse,
    pub vat: MoneyResponse,
    pub net_total: MoneyResponse,
}

impl From<&PricingResult> for PricingResultResponse {
    fn from(r: &PricingResult) -> Self {
        Self {
            total_days: r.total_days,
            times_per_day: r.times_per_day,
            total_spots: r.total_days.saturating_mul(r.times_per_day),
            campaign_months: round_money(r.campaign_months, 2),
            base_total: MoneyResponse::baht(r.base_total),
            condition_discount_percent: r.condition_discount_percent,
            condition_discount: MoneyResponse::baht(r.condition_discount_amount),
            payment_discount_percent: r.payment_discount_percent,
            payment_discount: MoneyResponse::baht(r.payment_discount_amount),
            total_discount: MoneyResponse::baht(r.total_discount_amount),
            price_after_discount: MoneyResponse::baht(r.price_after_discount),
            vat: MoneyResponse::baht(r.vat_amount),
            net_total: MoneyResponse::baht(r.net_total),
        }
    }
}

/// Response for a live quote preview
#[derive(Debug, Serialize)]
pub struct QuotePreviewResponse {
    pub computable: bool,
    pub end_date: Option<NaiveDate>,
    pub customer_category: CustomerCategory,
    pub item_name: Option<String>,
    pub result: Option<PricingResultResponse>,
}

/// Response for duration expansion
#[derive(Debug, Serialize)]
pub struct EndDateResponse {
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}
