//! Request DTOs for pricing API endpoints.

use chrono::NaiveDate;
use serde::Deserialize;

use super::models::{DaysOfWeek, PaymentTiming};
use super::schedule::DurationSpec;
use crate::models::OrderKind;

/// The order form as currently filled in.
///
/// Every field may still be empty; the engine decides whether the form is
/// computable yet.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub order_type: OrderKind,
    #[serde(default)]
    pub item_id: Option<String>,
    #[serde(default)]
    pub time_slots: Vec<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub duration: DurationSpec,
    #[serde(default = "default_days_of_week")]
    pub days_of_week: DaysOfWeek,
    #[serde(default)]
    pub payment_type: PaymentTiming,
    #[serde(default)]
    pub note: String,
}

fn default_days_of_week() -> DaysOfWeek {
    DaysOfWeek::WEEKDAYS
}

impl Default for QuoteRequest {
    fn default() -> Self {
        Self {
            customer_id: None,
            order_type: OrderKind::default(),
            item_id: None,
            time_slots: Vec::new(),
            start_date: None,
            duration: DurationSpec::default(),
            days_of_week: default_days_of_week(),
            payment_type: PaymentTiming::default(),
            note: String::new(),
        }
    }
}

/// Request to expand a duration shorthand into an end date
#[derive(Debug, Deserialize)]
pub struct EndDateRequest {
    pub start_date: NaiveDate,
    pub duration: DurationSpec,
}
