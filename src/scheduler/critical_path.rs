//! Critical path extraction.
//!
//! Longest path through a DAG where each activity weighs its duration.
//! The total of a path is the sum of its activities' durations, which for
//! the declared graph is the minimum project completion time.
//!
//! # Algorithm
//! Dynamic programming in topological order:
//! `dist[i] = dur[i] + max(dist[p])` over predecessors `p` with
//! `dist[p] > 0`. The path ends at the first node (in order) with the
//! largest `dist`. Zero-duration activities therefore never start or end
//! a path. Among equal-length paths the earliest in order wins.
//!
//! # Complexity
//! O(V + E).
//!
//! # Reference
//! Kelley & Walker (1959), "Critical-Path Planning and Scheduling"

use crate::error::ScheduleError;
use crate::graph::DependencyGraph;
use crate::models::{Activity, CriticalPath};

/// Longest duration-weighted path, or `None` if every path totals 0.
pub fn longest_path(
    graph: &DependencyGraph,
    order: &[usize],
    durations: &[u32],
) -> Option<CriticalPath> {
    let n = graph.node_count();
    let mut dist = vec![0u64; n];
    let mut prev: Vec<Option<usize>> = vec![None; n];
    let mut end: Option<usize> = None;

    for &node in order {
        if node >= n {
            continue;
        }
        let mut best = 0u64;
        for edge in graph.incoming(node) {
            if dist[edge.from] > best {
                best = dist[edge.from];
                prev[node] = Some(edge.from);
            }
        }
        dist[node] = best + u64::from(durations.get(node).copied().unwrap_or(0));
        if dist[node] > end.map_or(0, |e| dist[e]) {
            end = Some(node);
        }
    }

    let end = end?;
    let mut activities = vec![end];
    let mut cursor = end;
    while let Some(p) = prev[cursor] {
        activities.push(p);
        cursor = p;
    }
    activities.reverse();

    Some(CriticalPath {
        activities,
        total_days: u32::try_from(dist[end]).unwrap_or(u32::MAX),
    })
}

/// Critical path of the declared-dependency graph.
///
/// # Errors
/// [`ScheduleError::NoCriticalPath`] when the graph is empty or no
/// activity has a positive duration.
pub fn critical_path(
    activities: &[Activity],
    graph: &DependencyGraph,
    order: &[usize],
) -> Result<CriticalPath, ScheduleError> {
    longest_path(graph, order, &durations(activities)).ok_or(ScheduleError::NoCriticalPath)
}

/// Critical path of an effective-precedence graph, weighted by declared durations.
///
/// # Errors
/// [`ScheduleError::NoAdjustedCriticalPath`] when the graph has no nodes,
/// no edges, or only zero-duration paths.
pub fn adjusted_critical_path(
    activities: &[Activity],
    graph: &DependencyGraph,
) -> Result<CriticalPath, ScheduleError> {
    if graph.node_count() == 0 || !graph.has_edges() {
        return Err(ScheduleError::NoAdjustedCriticalPath);
    }
    let order = graph
        .topological_order()
        .map_err(|_| ScheduleError::NoAdjustedCriticalPath)?;
    longest_path(graph, &order, &durations(activities)).ok_or(ScheduleError::NoAdjustedCriticalPath)
}

fn durations(activities: &[Activity]) -> Vec<u32> {
    activities.iter().map(|a| a.duration_days).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve(acts: &[Activity]) -> Result<CriticalPath, ScheduleError> {
        let graph = DependencyGraph::from_activities(acts);
        let order = graph.topological_order().unwrap();
        critical_path(acts, &graph, &order)
    }

    #[test]
    fn test_scenario_path() {
        let acts = vec![
            Activity::new("A1").with_units(100.0).with_duration(5),
            Activity::new("A2").with_units(60.0).with_duration(3).with_predecessor(1),
            Activity::new("A3")
                .with_units(20.0)
                .with_duration(2)
                .with_partial_predecessor(1, 0.5),
        ];
        let path = solve(&acts).unwrap();
        assert_eq!(path.activities, vec![0, 1]);
        assert_eq!(path.total_days, 8);
    }

    #[test]
    fn test_diamond() {
        // A1 → {A2(2), A3(6)} → A4
        let acts = vec![
            Activity::new("A1").with_duration(1),
            Activity::new("A2").with_duration(2).with_predecessor(1),
            Activity::new("A3").with_duration(6).with_predecessor(1),
            Activity::new("A4").with_duration(1).with_predecessor(2).with_predecessor(3),
        ];
        let path = solve(&acts).unwrap();
        assert_eq!(path.labels(), vec![1, 3, 4]);
        assert_eq!(path.total_days, 8);
    }

    #[test]
    fn test_no_edges_picks_longest_activity() {
        let acts = vec![
            Activity::new("A1").with_duration(2),
            Activity::new("A2").with_duration(7),
            Activity::new("A3").with_duration(4),
        ];
        let path = solve(&acts).unwrap();
        assert_eq!(path.activities, vec![1]);
        assert_eq!(path.total_days, 7);
    }

    #[test]
    fn test_empty_graph() {
        assert_eq!(solve(&[]), Err(ScheduleError::NoCriticalPath));
    }

    #[test]
    fn test_single_zero_duration() {
        let acts = vec![Activity::new("A1").with_units(10.0)];
        assert_eq!(solve(&acts), Err(ScheduleError::NoCriticalPath));
    }

    #[test]
    fn test_zero_duration_not_at_ends() {
        // Z0 → A(3) → Z1
        let acts = vec![
            Activity::new("Z0"),
            Activity::new("A").with_duration(3).with_predecessor(1),
            Activity::new("Z1").with_predecessor(2),
        ];
        let path = solve(&acts).unwrap();
        assert_eq!(path.activities, vec![1]);
        assert_eq!(path.total_days, 3);
    }

    #[test]
    fn test_zero_duration_in_middle() {
        // A(5) → Z(0) → B(3)
        let acts = vec![
            Activity::new("A").with_duration(5),
            Activity::new("Z").with_predecessor(1),
            Activity::new("B").with_duration(3).with_predecessor(2),
        ];
        let path = solve(&acts).unwrap();
        assert_eq!(path.activities, vec![0, 1, 2]);
        assert_eq!(path.total_days, 8);
    }

    #[test]
    fn test_adjusted_requires_edges() {
        let acts = vec![Activity::new("A1").with_duration(3), Activity::new("A2").with_duration(4)];
        let graph = DependencyGraph::effective_precedence(&[0.0, 0.0]);
        assert_eq!(
            adjusted_critical_path(&acts, &graph),
            Err(ScheduleError::NoAdjustedCriticalPath)
        );
        assert_eq!(
            adjusted_critical_path(&[], &DependencyGraph::new(0)),
            Err(ScheduleError::NoAdjustedCriticalPath)
        );
    }

    #[test]
    fn test_adjusted_path() {
        let acts = vec![
            Activity::new("A1").with_duration(3),
            Activity::new("A2").with_duration(4),
            Activity::new("A3").with_duration(1),
        ];
        // A1 at 0, A2 at 3, A3 at 3
        let graph = DependencyGraph::effective_precedence(&[0.0, 3.0, 3.0]);
        let path = adjusted_critical_path(&acts, &graph).unwrap();
        assert_eq!(path.activities, vec![0, 1]);
        assert_eq!(path.total_days, 7);
    }
}
