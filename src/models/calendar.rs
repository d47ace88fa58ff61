//! Business-day calendar.
//!
//! Maps abstract day offsets onto calendar dates for display and export.
//! Scheduling itself works purely in day offsets; nothing in the
//! scheduler consults this calendar.
//!
//! # Working Days
//! A date is a business day iff:
//! - It is a weekday (Monday to Friday), AND
//! - It is NOT in the holiday set.

use std::collections::BTreeSet;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Fixed holidays used when no explicit set is configured.
const DEFAULT_HOLIDAYS: [(i32, u32, u32); 6] = [
    (2025, 1, 1),
    (2025, 4, 18),
    (2025, 5, 1),
    (2025, 7, 28),
    (2025, 7, 29),
    (2025, 12, 25),
];

/// Working calendar: weekdays minus a fixed holiday set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessCalendar {
    /// Non-working dates (in addition to weekends).
    pub holidays: BTreeSet<NaiveDate>,
}

impl BusinessCalendar {
    /// Creates a calendar with no holidays (weekends only).
    pub fn new() -> Self {
        Self {
            holidays: BTreeSet::new(),
        }
    }

    /// Adds a holiday.
    pub fn with_holiday(mut self, date: NaiveDate) -> Self {
        self.holidays.insert(date);
        self
    }

    /// Whether `date` is a working day.
    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !self.holidays.contains(&date)
    }

    /// Returns `count` business days on or after `start`, in order.
    pub fn business_days(&self, start: NaiveDate, count: usize) -> Vec<NaiveDate> {
        let mut days = Vec::with_capacity(count);
        let mut current = Some(start);
        while days.len() < count {
            let Some(date) = current else { break };
            if self.is_business_day(date) {
                days.push(date);
            }
            current = date.checked_add_days(Days::new(1));
        }
        days
    }

    /// The business day `offset` working days after the first business day
    /// on or after `start`.
    pub fn business_day_at(&self, start: NaiveDate, offset: usize) -> Option<NaiveDate> {
        self.business_days(start, offset + 1).pop()
    }
}

impl Default for BusinessCalendar {
    fn default() -> Self {
        let holidays = DEFAULT_HOLIDAYS
            .iter()
            .filter_map(|&(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
            .collect();
        Self { holidays }
    }
}
