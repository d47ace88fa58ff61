//! Schedule quality metrics (KPIs).
//!
//! Compares the nominal and constraint-adjusted schedules of one run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Nominal completion | Critical path total (days) |
//! | Adjusted completion | One past the last productive adjusted day |
//! | Delay | Adjusted minus nominal completion, floored at 0 |
//! | Start shift | `start'[i] - start[i]` per activity |
//! | Completion rate | Produced over planned units |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use serde::{Deserialize, Serialize};

use crate::models::ScheduleReport;

/// Nominal-versus-adjusted schedule indicators.
///
/// All time values are in days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleKpi {
    /// Critical path total of the nominal schedule.
    pub nominal_completion_days: usize,
    /// Realized completion of the adjusted schedule.
    pub adjusted_completion_days: usize,
    /// Days lost to production constraints.
    pub delay_days: usize,
    /// Adjusted minus nominal start, per activity.
    pub start_shifts: Vec<f64>,
    /// Activities whose adjusted start is later than nominal.
    pub delayed_activities: Vec<usize>,
    /// Units planned across all activities (nominal matrix total).
    pub planned_units: f64,
    /// Units produced across all activities (adjusted matrix total).
    pub produced_units: f64,
    /// Activities cut off by the safety horizon.
    pub unfinished_activities: usize,
}

impl ScheduleKpi {
    /// Computes KPIs from a report.
    pub fn calculate(report: &ScheduleReport) -> Self {
        let nominal_completion_days = report.nominal.completion_days() as usize;
        let adjusted_completion_days = report.adjusted.completion_days();

        let start_shifts: Vec<f64> = report
            .nominal
            .start_times
            .iter()
            .zip(&report.adjusted.start_times)
            .map(|(nominal, adjusted)| adjusted - nominal)
            .collect();
        let delayed_activities = start_shifts
            .iter()
            .enumerate()
            .filter(|&(_, &shift)| shift > 0.0)
            .map(|(idx, _)| idx)
            .collect();

        let planned_units = (0..report.nominal.production.rows())
            .map(|i| report.nominal.production.row_total(i))
            .sum();
        let produced_units = (0..report.adjusted.production.rows())
            .map(|i| report.adjusted.production.row_total(i))
            .sum();

        Self {
            nominal_completion_days,
            adjusted_completion_days,
            delay_days: adjusted_completion_days.saturating_sub(nominal_completion_days),
            start_shifts,
            delayed_activities,
            planned_units,
            produced_units,
            unfinished_activities: report.adjusted.unfinished.len(),
        }
    }

    /// Fraction of planned units produced (1.0 when nothing was planned).
    pub fn completion_rate(&self) -> f64 {
        if self.planned_units <= 0.0 {
            1.0
        } else {
            self.produced_units / self.planned_units
        }
    }

    /// Whether constraints left the completion date untouched.
    pub fn is_on_schedule(&self) -> bool {
        self.delay_days == 0 && self.unfinished_activities == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Activity, ProductionConstraint};
    use crate::scheduler::ScheduleEngine;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn activities() -> Vec<Activity> {
        vec![
            Activity::new("A1").with_units(100.0).with_duration(5),
            Activity::new("A2").with_units(60.0).with_duration(3).with_predecessor(1),
            Activity::new("A3")
                .with_units(20.0)
                .with_duration(2)
                .with_partial_predecessor(1, 0.5),
        ]
    }

    #[test]
    fn test_kpi_unconstrained() {
        let report = ScheduleEngine::new()
            .schedule(&activities(), &[], date(3))
            .unwrap();
        let kpi = ScheduleKpi::calculate(&report);

        assert_eq!(kpi.nominal_completion_days, 8);
        assert_eq!(kpi.adjusted_completion_days, 8);
        assert_eq!(kpi.delay_days, 0);
        // A3 waits for full completion once constrained
        assert_eq!(kpi.start_shifts, vec![0.0, 0.0, 2.5]);
        assert_eq!(kpi.delayed_activities, vec![2]);
        assert!((kpi.planned_units - 180.0).abs() < 1e-9);
        assert!((kpi.completion_rate() - 1.0).abs() < 1e-9);
        assert!(kpi.is_on_schedule());
    }

    #[test]
    fn test_kpi_blocked() {
        let constraints = vec![ProductionConstraint::blocked("A1", date(3), date(4))];
        let report = ScheduleEngine::new()
            .schedule(&activities(), &constraints, date(3))
            .unwrap();
        let kpi = ScheduleKpi::calculate(&report);

        assert_eq!(kpi.adjusted_completion_days, 10);
        assert_eq!(kpi.delay_days, 2);
        assert_eq!(kpi.start_shifts[0], 2.0);
        assert_eq!(kpi.delayed_activities, vec![0, 1, 2]);
        assert!(!kpi.is_on_schedule());
    }

    #[test]
    fn test_completion_rate_empty() {
        let report = ScheduleEngine::new().schedule(&[], &[], date(3)).unwrap();
        let kpi = ScheduleKpi::calculate(&report);
        assert_eq!(kpi.planned_units, 0.0);
        assert_eq!(kpi.completion_rate(), 1.0);
        assert!(kpi.start_shifts.is_empty());
    }
}
