//! Pricing engine module for airtime orders.
//!
//! Turns a customer's category, broadcast window, weekday selection, slot
//! count and payment timing into a discounted, VAT-inclusive total.

pub mod calculators;
pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod schedule;
pub mod services;

// Re-export commonly used items
pub use calculators::{calculate_pricing, format_baht, round_money};
pub use models::{CustomerCategory, DaysOfWeek, PaymentTiming, PricingInput, PricingResult};
pub use routes::router;
pub use schedule::{expand_end_date, DurationSpec};
pub use services::{place_order, preview_quote, PricingError, QuoteDraft};
