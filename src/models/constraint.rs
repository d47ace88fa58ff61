//! Daily production constraints.
//!
//! A constraint caps an activity's production rate over an inclusive
//! calendar-date range: a multiplier of 0 blocks production entirely,
//! 1 leaves it unconstrained, and anything between throttles it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A production-rate restriction on one activity over a date range.
///
/// Constraints reference activities by name and are resolved best-effort:
/// a name that matches no activity is skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionConstraint {
    /// Name of the restricted activity.
    pub activity_name: String,
    /// First restricted date (inclusive).
    pub start_date: NaiveDate,
    /// Last restricted date (inclusive).
    pub end_date: NaiveDate,
    /// Rate multiplier in `[0, 1]`.
    pub multiplier: f64,
}

impl ProductionConstraint {
    /// Creates a constraint.
    pub fn new(
        activity_name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        multiplier: f64,
    ) -> Self {
        Self {
            activity_name: activity_name.into(),
            start_date,
            end_date,
            multiplier,
        }
    }

    /// Creates a constraint that fully blocks production over the range.
    pub fn blocked(
        activity_name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self::new(activity_name, start_date, end_date, 0.0)
    }

    /// Multiplier clamped into `[0, 1]`; non-finite values are treated as 1.0.
    pub fn effective_multiplier(&self) -> f64 {
        if self.multiplier.is_finite() {
            self.multiplier.clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Inclusive day-offset range relative to `project_start`.
    ///
    /// Offsets count calendar days. Returns `None` if the range is reversed.
    pub fn day_offsets(&self, project_start: NaiveDate) -> Option<(i64, i64)> {
        if self.end_date < self.start_date {
            return None;
        }
        let first = (self.start_date - project_start).num_days();
        let last = (self.end_date - project_start).num_days();
        Some((first, last))
    }
}
