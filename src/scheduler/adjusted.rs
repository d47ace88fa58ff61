//! Constrained re-simulation.
//!
//! Re-derives start times and production under a constraint matrix.
//! Constraints act in two distinct ways:
//! - A multiplier of exactly 0 on the candidate start day **delays** the
//!   start, one day at a time, until an unblocked day (or the horizon).
//! - A multiplier in (0, 1) never delays; it **throttles** daily output,
//!   stretching production over more days.
//!
//! # Algorithm
//! 1. In topological order, start at `max(start'[p] + dur[p])` over all
//!    predecessors (full completion), then skip fully blocked days within
//!    `[0, T)`. Zero-duration activities skip no days.
//! 2. From the adjusted start day, produce `rate × multiplier` per day
//!    (multiplier 1.0 beyond `T`), capped at the remaining units, until all
//!    units are produced or the safety horizon is reached.
//! 3. Trim the matrix after the last productive day.
//! 4. Derive the effective-precedence graph from adjusted starts and take
//!    its critical path.

use tracing::{debug, warn};

use super::critical_path::adjusted_critical_path;
use super::production::start_day;
use super::propagation::{earliest_start, DependencyRule};
use crate::config::EngineConfig;
use crate::graph::DependencyGraph;
use crate::models::{Activity, AdjustedSchedule, DayMatrix};

/// Multiplier for a cell; out-of-range or non-finite cells are unconstrained.
#[inline]
fn multiplier_at(constraints: &DayMatrix, row: usize, day: usize) -> f64 {
    constraints
        .get(row, day)
        .filter(|m| m.is_finite())
        .unwrap_or(1.0)
}

/// Adjusted start times: full-completion dependencies plus blocked-day delays.
///
/// Blocking is only checked within the constraint matrix's horizon.
pub fn adjusted_start_times(
    activities: &[Activity],
    order: &[usize],
    graph: &DependencyGraph,
    constraints: &DayMatrix,
) -> Vec<f64> {
    let horizon = constraints.days();
    let mut starts = vec![0.0; activities.len()];

    for &idx in order {
        let Some(act) = activities.get(idx) else {
            continue;
        };
        let mut start =
            earliest_start(idx, activities, graph, &starts, DependencyRule::FullCompletion);

        if act.duration_days > 0 {
            let mut day = start_day(start);
            while day < horizon && multiplier_at(constraints, idx, day) <= 0.0 {
                day += 1;
                start += 1.0;
            }
        }
        starts[idx] = start;
    }

    starts
}

/// Production under constraints, `safety_days` wide before trimming.
///
/// An activity is done once the outstanding units are within `tolerance`
/// relative to its target (absolute below one unit).
///
/// Returns the matrix trimmed after the last productive day (or cut to
/// the constraint horizon if nothing was produced) and the activities that
/// hit `safety_days` with units outstanding.
pub fn adjusted_production(
    activities: &[Activity],
    start_times: &[f64],
    constraints: &DayMatrix,
    safety_days: usize,
    tolerance: f64,
) -> (DayMatrix, Vec<usize>) {
    let mut matrix = DayMatrix::zeros(activities.len(), safety_days);
    let mut unfinished = Vec::new();

    for (idx, act) in activities.iter().enumerate() {
        let Some(rate) = act.daily_rate() else {
            continue;
        };
        let target = act.units_to_produce;
        let eps = tolerance * target.max(1.0);
        let mut produced = 0.0;
        let mut day = start_day(start_times.get(idx).copied().unwrap_or(0.0));

        while target - produced > eps && day < safety_days {
            let multiplier = multiplier_at(constraints, idx, day);
            if multiplier > 0.0 {
                let amount = (rate * multiplier).min(target - produced);
                matrix.set(idx, day, amount);
                produced += amount;
            }
            day += 1;
        }

        if target - produced > eps {
            warn!(
                activity = idx,
                produced,
                target,
                safety_days,
                "safety horizon reached before all units were produced"
            );
            unfinished.push(idx);
        }
    }

    (matrix.trimmed(constraints.days()), unfinished)
}

/// Runs the full constrained re-simulation.
pub fn simulate_constrained(
    activities: &[Activity],
    order: &[usize],
    graph: &DependencyGraph,
    constraints: &DayMatrix,
    config: &EngineConfig,
) -> AdjustedSchedule {
    let start_times = adjusted_start_times(activities, order, graph, constraints);
    let safety_days = config.safety_horizon_days(constraints.days());
    let (production, unfinished) = adjusted_production(
        activities,
        &start_times,
        constraints,
        safety_days,
        config.tolerance,
    );

    let effective = DependencyGraph::effective_precedence(&start_times);
    let critical_path = match adjusted_critical_path(activities, &effective) {
        Ok(path) => Some(path),
        Err(err) => {
            debug!(%err, "adjusted schedule has no critical path");
            None
        }
    };

    AdjustedSchedule {
        start_times,
        graph: effective,
        critical_path,
        production,
        unfinished,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Vec<Activity> {
        vec![
            Activity::new("A1").with_units(100.0).with_duration(5),
            Activity::new("A2").with_units(60.0).with_duration(3).with_predecessor(1),
        ]
    }

    fn starts_for(acts: &[Activity], constraints: &DayMatrix) -> Vec<f64> {
        let graph = DependencyGraph::from_activities(acts);
        let order = graph.topological_order().unwrap();
        adjusted_start_times(acts, &order, &graph, constraints)
    }

    #[test]
    fn test_unconstrained_starts() {
        let acts = chain();
        let starts = starts_for(&acts, &DayMatrix::filled(2, 8, 1.0));
        assert_eq!(starts, vec![0.0, 5.0]);
    }

    #[test]
    fn test_blocked_days_delay_start() {
        let acts = chain();
        let mut r = DayMatrix::filled(2, 8, 1.0);
        r.set(0, 0, 0.0);
        r.set(0, 1, 0.0);
        let starts = starts_for(&acts, &r);
        assert_eq!(starts[0], 2.0);
        // Dependent inherits the delay through full completion
        assert_eq!(starts[1], 7.0);
    }

    #[test]
    fn test_partial_block_does_not_delay() {
        let acts = chain();
        let mut r = DayMatrix::filled(2, 8, 1.0);
        r.set(0, 0, 0.1);
        let starts = starts_for(&acts, &r);
        assert_eq!(starts[0], 0.0);
    }

    #[test]
    fn test_block_stops_at_horizon() {
        let acts = vec![Activity::new("A1").with_units(10.0).with_duration(2)];
        let r = DayMatrix::filled(1, 3, 0.0);
        let starts = starts_for(&acts, &r);
        assert_eq!(starts[0], 3.0);
    }

    #[test]
    fn test_zero_duration_not_delayed() {
        let acts = vec![Activity::new("Milestone")];
        let r = DayMatrix::filled(1, 3, 0.0);
        assert_eq!(starts_for(&acts, &r), vec![0.0]);
    }

    #[test]
    fn test_throttled_production_stretches() {
        let acts = vec![Activity::new("A1").with_units(40.0).with_duration(2)];
        let mut r = DayMatrix::filled(1, 2, 1.0);
        r.set(0, 0, 0.5);
        let (m, unfinished) = adjusted_production(&acts, &[0.0], &r, 4, 1e-9);
        // 10 + 20 + 10 (cap)
        assert_eq!(m.days(), 3);
        assert_eq!(m.row(0), &[10.0, 20.0, 10.0]);
        assert!(unfinished.is_empty());
    }

    #[test]
    fn test_blocked_mid_production_skips_day() {
        let acts = vec![Activity::new("A1").with_units(30.0).with_duration(3)];
        let mut r = DayMatrix::filled(1, 3, 1.0);
        r.set(0, 1, 0.0);
        let (m, _) = adjusted_production(&acts, &[0.0], &r, 6, 1e-9);
        assert_eq!(m.row(0), &[10.0, 0.0, 10.0, 10.0]);
    }

    #[test]
    fn test_safety_horizon_reached() {
        let acts = vec![Activity::new("A1").with_units(100.0).with_duration(2)];
        let r = DayMatrix::filled(1, 2, 0.25);
        let (m, unfinished) = adjusted_production(&acts, &[0.0], &r, 3, 1e-9);
        assert_eq!(unfinished, vec![0]);
        // Days beyond the constraint horizon run unconstrained
        assert_eq!(m.row(0), &[12.5, 12.5, 50.0]);
    }

    #[test]
    fn test_large_units_finish_on_nominal_day() {
        // 1e12 / 7 summed seven times leaves a rounding residue above 1e-9
        let acts = vec![Activity::new("A1").with_units(1e12).with_duration(7)];
        let r = DayMatrix::filled(1, 7, 1.0);
        let (m, unfinished) = adjusted_production(&acts, &[0.0], &r, 14, 1e-9);
        assert_eq!(m.days(), 7);
        assert!(unfinished.is_empty());
        assert!((m.row_total(0) - 1e12).abs() / 1e12 < 1e-12);
    }

    #[test]
    fn test_uneven_rate_finishes_on_nominal_day() {
        let acts = vec![
            Activity::new("A1").with_units(1e9).with_duration(11),
            Activity::new("A2").with_units(100.0).with_duration(3),
        ];
        let r = DayMatrix::filled(2, 11, 1.0);
        let (m, unfinished) = adjusted_production(&acts, &[0.0, 0.0], &r, 22, 1e-9);
        assert_eq!(m.days(), 11);
        assert_eq!(m.row(1)[3..], [0.0; 8]);
        assert!(unfinished.is_empty());
    }

    #[test]
    fn test_no_production_uses_horizon_width() {
        let acts = vec![Activity::new("Idle").with_duration(2)];
        let r = DayMatrix::filled(1, 5, 1.0);
        let (m, unfinished) = adjusted_production(&acts, &[0.0], &r, 10, 1e-9);
        assert_eq!(m.days(), 5);
        assert!(unfinished.is_empty());
    }

    #[test]
    fn test_simulate_builds_effective_graph() {
        let acts = vec![
            Activity::new("A1").with_units(100.0).with_duration(5),
            Activity::new("A2").with_units(60.0).with_duration(3).with_predecessor(1),
            Activity::new("A3")
                .with_units(20.0)
                .with_duration(2)
                .with_partial_predecessor(1, 0.5),
        ];
        let graph = DependencyGraph::from_activities(&acts);
        let order = graph.topological_order().unwrap();
        let r = DayMatrix::filled(3, 8, 1.0);
        let adjusted = simulate_constrained(&acts, &order, &graph, &r, &EngineConfig::default());

        assert_eq!(adjusted.start_times, vec![0.0, 5.0, 5.0]);
        assert_eq!(adjusted.graph.edge_count(), 2);
        let path = adjusted.critical_path.as_ref().unwrap();
        assert_eq!(path.activities, vec![0, 1]);
        assert_eq!(path.total_days, 8);
        assert_eq!(adjusted.completion_days(), 8);
    }

    #[test]
    fn test_simulate_without_precedence() {
        let acts = vec![
            Activity::new("A1").with_units(10.0).with_duration(2),
            Activity::new("A2").with_units(10.0).with_duration(2),
        ];
        let graph = DependencyGraph::from_activities(&acts);
        let order = graph.topological_order().unwrap();
        let r = DayMatrix::filled(2, 2, 1.0);
        let adjusted = simulate_constrained(&acts, &order, &graph, &r, &EngineConfig::default());
        assert!(adjusted.critical_path.is_none());
    }
}
