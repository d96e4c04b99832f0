//! Core pricing calculation functions.
//!
//! Pure functions for airtime pricing math - no state, no clock, no I/O.
//! Amounts are kept at full decimal precision; rounding happens only when
//! a value is displayed.

use chrono::NaiveDate;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

use super::models::{CustomerCategory, DaysOfWeek, PaymentTiming, PricingInput, PricingResult};

/// Flat VAT rate applied to the discounted price.
pub const VAT_RATE: Decimal = dec!(0.07);

/// Length of a "month" when measuring campaign duration.
pub const DAYS_PER_MONTH: Decimal = dec!(30);

/// Discount granted to every government order.
pub const GOVERNMENT_DISCOUNT_PERCENT: u32 = 40;

/// Discount for paying before the campaign airs.
pub const PREPAYMENT_DISCOUNT_PERCENT: u32 = 5;

/// Duration tiers for private and state enterprise customers, longest first.
const DURATION_TIERS: [(Decimal, u32); 3] = [(dec!(6), 30), (dec!(3), 25), (dec!(2), 20)];

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use airtime_sales::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Format an amount as baht with thousands separators and two decimals.
///
/// ```
/// use rust_decimal_macros::dec;
/// use airtime_sales::pricing::format_baht;
///
/// assert_eq!(format_baht(dec!(1234567.891)), "1,234,567.89");
/// ```
pub fn format_baht(amount: Decimal) -> String {
    let rounded = round_money(amount, 2);
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{}.{}", sign, grouped, fraction)
}

/// Count the dates in `[start, end]` whose weekday is active.
///
/// Walks the window day by day so any weekday subset is handled exactly
/// across month and leap-year boundaries.
pub fn count_active_days(start: NaiveDate, end: NaiveDate, days: DaysOfWeek) -> u32 {
    if days.is_empty() {
        return 0;
    }

    let mut count = 0;
    let mut current = start;
    while current <= end {
        if days.contains_date(current) {
            count += 1;
        }
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }
    count
}

/// Campaign length in flat 30-day months, counting both endpoints.
pub fn campaign_months(start: NaiveDate, end: NaiveDate) -> Decimal {
    let diff_days = (end - start).num_days().abs() + 1;
    Decimal::from(diff_days) / DAYS_PER_MONTH
}

/// Condition discount for a customer category and campaign length.
pub fn condition_discount_percent(category: CustomerCategory, months: Decimal) -> u32 {
    match category {
        CustomerCategory::Government => GOVERNMENT_DISCOUNT_PERCENT,
        CustomerCategory::Private | CustomerCategory::StateEnterprise => DURATION_TIERS
            .iter()
            .find(|(threshold, _)| months >= *threshold)
            .map(|(_, percent)| *percent)
            .unwrap_or(0),
    }
}

pub fn payment_discount_percent(timing: PaymentTiming) -> u32 {
    match timing {
        PaymentTiming::BeforeAiring => PREPAYMENT_DISCOUNT_PERCENT,
        PaymentTiming::AfterAiring => 0,
    }
}

fn percent_of(amount: Decimal, percent: u32) -> Decimal {
    amount * Decimal::from(percent) / Decimal::ONE_HUNDRED
}

/// Price an airtime order.
///
/// Returns `None` when the input is not computable yet: no item price,
/// a missing date, or an end date before the start date. A window with no
/// active weekdays is computable and prices to zero.
pub fn calculate_pricing(input: &PricingInput) -> Option<PricingResult> {
    let unit_price = input.unit_price?;
    let start = input.start_date?;
    let end = input.end_date?;
    if end < start {
        return None;
    }

    let total_days = count_active_days(start, end, input.active_weekdays);
    let times_per_day = input.slot_count.max(1);
    let base_total = unit_price * Decimal::from(times_per_day) * Decimal::from(total_days);

    let months = campaign_months(start, end);
    let condition_percent = condition_discount_percent(input.customer_category, months);
    let payment_percent = payment_discount_percent(input.payment_timing);

    // Prepayment discount compounds on the already discounted amount.
    let condition_amount = percent_of(base_total, condition_percent);
    let payment_amount = percent_of(base_total - condition_amount, payment_percent);
    let total_discount = condition_amount + payment_amount;

    let price_after_discount = base_total - total_discount;
    let vat_amount = price_after_discount * VAT_RATE;
    let net_total = price_after_discount + vat_amount;

    Some(PricingResult {
        total_days,
        times_per_day,
        base_total,
        condition_discount_percent: condition_percent,
        payment_discount_percent: payment_percent,
        condition_discount_amount: condition_amount,
        payment_discount_amount: payment_amount,
        total_discount_amount: total_discount,
        price_after_discount,
        vat_amount,
        net_total,
        campaign_months: months,
    })
}
