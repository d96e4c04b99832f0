//! Value types consumed and produced by the pricing engine.
//!
//! Enum variants accept the Thai labels used by the browser tool's backups
//! as serde aliases, so old snapshots import cleanly.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Customer organisation type. Drives the condition discount tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerCategory {
    #[default]
    #[serde(alias = "เอกชน")]
    Private,
    #[serde(alias = "ราชการ")]
    Government,
    #[serde(alias = "รัฐวิสาหกิจ")]
    StateEnterprise,
}

impl CustomerCategory {
    pub fn label(self) -> &'static str {
        match self {
            CustomerCategory::Private => "Private",
            CustomerCategory::Government => "Government",
            CustomerCategory::StateEnterprise => "State enterprise",
        }
    }
}

/// When the customer settles the invoice relative to broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentTiming {
    #[default]
    #[serde(alias = "หลังออกอากาศ")]
    AfterAiring,
    #[serde(alias = "ก่อนออกอากาศ")]
    BeforeAiring,
}

/// Set of broadcast weekdays, 0 = Sunday .. 6 = Saturday.
///
/// Serialized as a sorted list of day numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct DaysOfWeek(u8);

impl DaysOfWeek {
    pub const NONE: DaysOfWeek = DaysOfWeek(0);
    /// Monday to Friday, the order-entry default.
    pub const WEEKDAYS: DaysOfWeek = DaysOfWeek(0b0011_1110);
    pub const ALL: DaysOfWeek = DaysOfWeek(0b0111_1111);

    /// Build from day numbers, rejecting anything outside 0..=6.
    pub fn from_days(days: &[u8]) -> Result<Self, InvalidWeekday> {
        days.iter().try_fold(Self::NONE, |set, &day| set.with(day))
    }

    pub fn with(self, day: u8) -> Result<Self, InvalidWeekday> {
        if day > 6 {
            return Err(InvalidWeekday(day));
        }
        Ok(DaysOfWeek(self.0 | (1 << day)))
    }

    pub fn contains(self, weekday: Weekday) -> bool {
        self.0 & (1 << weekday.num_days_from_sunday()) != 0
    }

    pub fn contains_date(self, date: NaiveDate) -> bool {
        self.contains(date.weekday())
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> u32 {
        self.0.count_ones()
    }

    pub fn days(self) -> Vec<u8> {
        (0..7).filter(|d| self.0 & (1 << d) != 0).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("weekday {0} is out of range 0..=6")]
pub struct InvalidWeekday(pub u8);

impl TryFrom<Vec<u8>> for DaysOfWeek {
    type Error = InvalidWeekday;

    fn try_from(days: Vec<u8>) -> Result<Self, Self::Error> {
        DaysOfWeek::from_days(&days)
    }
}

impl From<DaysOfWeek> for Vec<u8> {
    fn from(set: DaysOfWeek) -> Self {
        set.days()
    }
}

/// Inputs to one pricing computation.
///
/// Optional fields mirror an order being filled in: an absent item or date
/// makes the computation "not computable" rather than zero.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingInput {
    pub unit_price: Option<Decimal>,
    pub slot_count: u32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub active_weekdays: DaysOfWeek,
    pub customer_category: CustomerCategory,
    pub payment_timing: PaymentTiming,
}

/// Priced breakdown of an order, stored verbatim on the order record.
///
/// `base_total` keeps the `totalPrice` key of the snapshot format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    pub total_days: u32,
    pub times_per_day: u32,
    #[serde(rename = "totalPrice", alias = "baseTotal")]
    pub base_total: Decimal,
    pub condition_discount_percent: u32,
    pub payment_discount_percent: u32,
    #[serde(default)]
    pub condition_discount_amount: Decimal,
    #[serde(default)]
    pub payment_discount_amount: Decimal,
    pub total_discount_amount: Decimal,
    pub price_after_discount: Decimal,
    pub vat_amount: Decimal,
    pub net_total: Decimal,
    #[serde(default)]
    pub campaign_months: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_of_week_membership() {
        let set = DaysOfWeek::WEEKDAYS;
        assert!(set.contains(Weekday::Mon));
        assert!(set.contains(Weekday::Fri));
        assert!(!set.contains(Weekday::Sat));
        assert!(!set.contains(Weekday::Sun));
        assert_eq!(set.len(), 5);
        assert_eq!(set.days(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_days_of_week_rejects_out_of_range() {
        assert_eq!(DaysOfWeek::from_days(&[0, 7]), Err(InvalidWeekday(7)));
        assert!(serde_json::from_str::<DaysOfWeek>("[1, 9]").is_err());
    }

    #[test]
    fn test_days_of_week_serde_is_sorted_list() {
        let set: DaysOfWeek = serde_json::from_str("[6, 0, 3, 3]").unwrap();
        assert_eq!(serde_json::to_string(&set).unwrap(), "[0,3,6]");
    }

    #[test]
    fn test_thai_labels_deserialize() {
        let category: CustomerCategory = serde_json::from_str("\"ราชการ\"").unwrap();
        assert_eq!(category, CustomerCategory::Government);
        let category: CustomerCategory = serde_json::from_str("\"state_enterprise\"").unwrap();
        assert_eq!(category, CustomerCategory::StateEnterprise);
        let timing: PaymentTiming = serde_json::from_str("\"ก่อนออกอากาศ\"").unwrap();
        assert_eq!(timing, PaymentTiming::BeforeAiring);
    }

    #[test]
    fn test_pricing_result_reads_legacy_numbers() {
        // Older backups carry plain JSON numbers and no campaign months.
        let json = r#"{
            "totalDays": 5, "timesPerDay": 2, "totalPrice": 1000,
            "conditionDiscountPercent": 0, "paymentDiscountPercent": 5,
            "totalDiscountAmount": 50, "priceAfterDiscount": 950,
            "vatAmount": 66.5, "netTotal": 1016.5
        }"#;
        let result: PricingResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.base_total, Decimal::from(1000));
        assert_eq!(result.vat_amount, Decimal::new(665, 1));
        assert_eq!(result.campaign_months, Decimal::ZERO);
    }
}
