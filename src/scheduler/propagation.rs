//! Start-time propagation.
//!
//! Walks a topological order and assigns each activity the earliest start
//! its predecessors allow. Two dependency rules exist:
//!
//! | Rule | Bound per edge `p → i` | Zero-duration `p` |
//! |------|------------------------|-------------------|
//! | `PartialProgress` | `start[p] + f(p,i) × dur[p]` | ignored |
//! | `FullCompletion` | `start[p] + dur[p]` | bounds by `start[p]` |
//!
//! The nominal schedule uses `PartialProgress`; the constrained
//! re-simulation uses `FullCompletion`.

use crate::graph::DependencyGraph;
use crate::models::Activity;

/// How a predecessor's progress gates its dependents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyRule {
    /// Dependent may start once the required fraction has elapsed.
    PartialProgress,
    /// Dependent waits for the predecessor to fully finish.
    FullCompletion,
}

/// Nominal start times (partial progress honored).
///
/// Activities not in `order` keep a start of 0.
pub fn nominal_start_times(
    activities: &[Activity],
    order: &[usize],
    graph: &DependencyGraph,
) -> Vec<f64> {
    propagate(activities, order, graph, DependencyRule::PartialProgress)
}

/// Start times under `rule`, one per activity.
pub fn propagate(
    activities: &[Activity],
    order: &[usize],
    graph: &DependencyGraph,
    rule: DependencyRule,
) -> Vec<f64> {
    let mut starts = vec![0.0; activities.len()];
    for &idx in order {
        if idx < activities.len() {
            starts[idx] = earliest_start(idx, activities, graph, &starts, rule);
        }
    }
    starts
}

/// Earliest start of `idx` given already-computed predecessor starts.
///
/// The maximum over no predecessors is 0.
pub(crate) fn earliest_start(
    idx: usize,
    activities: &[Activity],
    graph: &DependencyGraph,
    starts: &[f64],
    rule: DependencyRule,
) -> f64 {
    let Some(act) = activities.get(idx) else {
        return 0.0;
    };

    let mut earliest = 0.0_f64;
    for edge in graph.incoming(idx) {
        let (Some(pred), Some(&pred_start)) =
            (activities.get(edge.from), starts.get(edge.from))
        else {
            continue;
        };
        let duration = f64::from(pred.duration_days);
        let bound = match rule {
            DependencyRule::PartialProgress => {
                if pred.duration_days == 0 {
                    continue;
                }
                let fraction = edge.position.map_or(1.0, |k| act.required_progress_at(k));
                pred_start + fraction * duration
            }
            DependencyRule::FullCompletion => pred_start + duration,
        };
        earliest = earliest.max(bound);
    }
    earliest
}
