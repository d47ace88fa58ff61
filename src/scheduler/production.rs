//! Nominal production matrix.
//!
//! Spreads each productive activity's units evenly over its duration,
//! starting on the day its (possibly fractional) start falls in.

use crate::models::{Activity, DayMatrix};

/// Builds the `activities × horizon_days` nominal production matrix.
///
/// Row `i` holds `units / duration` on days
/// `[floor(start[i]), floor(start[i]) + duration)`, clipped to the horizon.
/// Degenerate activities get an all-zero row.
pub fn nominal_production(
    activities: &[Activity],
    start_times: &[f64],
    horizon_days: usize,
) -> DayMatrix {
    let mut matrix = DayMatrix::zeros(activities.len(), horizon_days);

    for (idx, act) in activities.iter().enumerate() {
        let Some(rate) = act.daily_rate() else {
            continue;
        };
        let first = start_day(start_times.get(idx).copied().unwrap_or(0.0));
        let end = first
            .saturating_add(act.duration_days as usize)
            .min(horizon_days);
        for day in first..end {
            matrix.set(idx, day, rate);
        }
    }

    matrix
}

/// Day column an activity starting at `start` begins producing in.
#[inline]
pub(crate) fn start_day(start: f64) -> usize {
    if start.is_finite() && start > 0.0 {
        start.floor() as usize
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_matrix() {
        let acts = vec![
            Activity::new("A1").with_units(100.0).with_duration(5),
            Activity::new("A2").with_units(60.0).with_duration(3),
            Activity::new("A3").with_units(20.0).with_duration(2),
        ];
        let m = nominal_production(&acts, &[0.0, 5.0, 2.5], 8);

        assert_eq!(m.days(), 8);
        assert_eq!(m.row(0), &[20.0, 20.0, 20.0, 20.0, 20.0, 0.0, 0.0, 0.0]);
        assert_eq!(m.row(1), &[0.0, 0.0, 0.0, 0.0, 0.0, 20.0, 20.0, 20.0]);
        // Fractional start 2.5 begins on day 2
        assert_eq!(m.row(2), &[0.0, 0.0, 10.0, 10.0, 0.0, 0.0, 0.0, 0.0]);

        for (i, act) in acts.iter().enumerate() {
            assert!((m.row_total(i) - act.units_to_produce).abs() < 1e-9);
        }
    }

    #[test]
    fn test_degenerate_rows_zero() {
        let acts = vec![
            Activity::new("No duration").with_units(10.0),
            Activity::new("No units").with_duration(3),
        ];
        let m = nominal_production(&acts, &[0.0, 0.0], 4);
        assert_eq!(m.row_total(0), 0.0);
        assert_eq!(m.row_total(1), 0.0);
    }

    #[test]
    fn test_clipped_to_horizon() {
        let acts = vec![Activity::new("A1").with_units(30.0).with_duration(3)];
        let m = nominal_production(&acts, &[2.0], 4);
        assert_eq!(m.row(0), &[0.0, 0.0, 10.0, 10.0]);
    }

    #[test]
    fn test_start_day() {
        assert_eq!(start_day(2.9), 2);
        assert_eq!(start_day(-1.0), 0);
        assert_eq!(start_day(f64::NAN), 0);
    }
}
