//! Constraint matrix construction.
//!
//! Maps dated production constraints onto the day grid of the nominal
//! schedule. The join from constraint to activity is best-effort: unknown
//! names and ranges entirely outside the horizon are skipped.

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{Activity, DayMatrix, ProductionConstraint};
use crate::validation::resolve_activity;

/// Builds the `activities × horizon_days` multiplier matrix.
///
/// Starts at 1.0 everywhere; each constraint, in input order, overwrites
/// its activity's row over the inclusive day range `[start, end]` measured
/// in calendar days from `project_start`. Later constraints win where
/// ranges overlap.
pub fn constraint_matrix(
    activities: &[Activity],
    constraints: &[ProductionConstraint],
    project_start: NaiveDate,
    horizon_days: usize,
) -> DayMatrix {
    let mut matrix = DayMatrix::filled(activities.len(), horizon_days, 1.0);

    for c in constraints {
        let Some(row) = resolve_activity(activities, &c.activity_name) else {
            debug!(activity = %c.activity_name, "constraint names unknown activity; skipped");
            continue;
        };
        let Some((first, last)) = c.day_offsets(project_start) else {
            debug!(activity = %c.activity_name, "constraint range is reversed; skipped");
            continue;
        };
        let Some(days) = clip(first, last, horizon_days) else {
            continue;
        };
        let multiplier = c.effective_multiplier();
        for day in days {
            matrix.set(row, day, multiplier);
        }
    }

    matrix
}

/// Clips an inclusive offset range to `[0, horizon)`.
fn clip(first: i64, last: i64, horizon: usize) -> Option<std::ops::RangeInclusive<usize>> {
    if horizon == 0 || last < 0 {
        return None;
    }
    let first = usize::try_from(first.max(0)).ok()?;
    if first >= horizon {
        return None;
    }
    let last = usize::try_from(last).map_or(horizon - 1, |l| l.min(horizon - 1));
    Some(first..=last)
}
