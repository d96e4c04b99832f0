//! Broadcast schedule helpers: campaign duration shorthands and the
//! catalogue of sellable time slots.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// How the end of a campaign window is chosen on the order form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DurationSpec {
    /// Explicit end date.
    Dates {
        #[serde(default)]
        end_date: Option<NaiveDate>,
    },
    /// Number of calendar days including the start date.
    Days { value: u32 },
    /// Number of calendar months starting on the start date.
    Months { value: u32 },
}

impl Default for DurationSpec {
    fn default() -> Self {
        DurationSpec::Dates { end_date: None }
    }
}

/// Expand a duration shorthand into a concrete inclusive end date.
///
/// Month arithmetic does not clamp: days past the end of the target month
/// spill into the following month, so 31 Jan + 1 month ends on 1 Mar 2024.
/// A count of zero yields the day before `start`, which the engine rejects.
pub fn expand_end_date(start: NaiveDate, duration: DurationSpec) -> Option<NaiveDate> {
    match duration {
        DurationSpec::Dates { end_date } => end_date,
        DurationSpec::Days { value: 0 } => start.pred_opt(),
        DurationSpec::Days { value } => start.checked_add_days(Days::new(u64::from(value - 1))),
        DurationSpec::Months { value } => start
            .with_day(1)?
            .checked_add_months(Months::new(value))?
            .checked_add_days(Days::new(u64::from(start.day() - 1)))?
            .pred_opt(),
    }
}

/// A named block of consecutive half-hour slots.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SlotPeriod {
    pub period: &'static str,
    pub slots: [&'static str; 4],
}

/// Airtime slots on sale, 08:00 to 18:00.
pub const TIME_SLOTS: [SlotPeriod; 5] = [
    SlotPeriod {
        period: "Morning (08:00-10:00)",
        slots: ["08:00-08:30", "08:30-09:00", "09:00-09:30", "09:30-10:00"],
    },
    SlotPeriod {
        period: "Late morning (10:00-12:00)",
        slots: ["10:00-10:30", "10:30-11:00", "11:00-11:30", "11:30-12:00"],
    },
    SlotPeriod {
        period: "Midday (12:00-14:00)",
        slots: ["12:00-12:30", "12:30-13:00", "13:00-13:30", "13:30-14:00"],
    },
    SlotPeriod {
        period: "Afternoon (14:00-16:00)",
        slots: ["14:00-14:30", "14:30-15:00", "15:00-15:30", "15:30-16:00"],
    },
    SlotPeriod {
        period: "Evening (16:00-18:00)",
        slots: ["16:00-16:30", "16:30-17:00", "17:00-17:30", "17:30-18:00"],
    },
];

pub fn is_known_slot(slot: &str) -> bool {
    TIME_SLOTS.iter().any(|p| p.slots.contains(&slot))
}

/// Distinct slots from a selection, preserving first-seen order.
pub fn distinct_slots(slots: &[String]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(slots.len());
    for slot in slots {
        if !seen.contains(slot) {
            seen.push(slot.clone());
        }
    }
    seen
}
