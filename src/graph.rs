//! Dependency graph over activity indices.
//!
//! Builds the precedence DAG from declared predecessors, validates
//! acyclicity, and produces a deterministic topological order. Also builds
//! the effective-precedence graph of a realized schedule.
//!
//! # Determinism
//! Topological order is Kahn's algorithm with a min-index ready queue, so
//! equal inputs always produce the same order. Cycle detection is an
//! iterative DFS from the lowest unvisited index.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::ScheduleError;
use crate::models::{label_to_index, Activity};

/// A directed edge `from → to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Predecessor index.
    pub from: usize,
    /// Dependent index.
    pub to: usize,
    /// Position of this predecessor in the dependent's predecessor list.
    /// `None` for derived edges.
    pub position: Option<usize>,
}

/// Directed graph over activity indices `0..node_count`.
///
/// Parallel edges are kept: a predecessor listed twice contributes two
/// edges, each evaluated on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyGraph {
    node_count: usize,
    edges: Vec<Edge>,
    incoming: Vec<Vec<usize>>,
    outgoing: Vec<Vec<usize>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

impl DependencyGraph {
    /// Creates a graph with `node_count` nodes and no edges.
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count,
            edges: Vec::new(),
            incoming: vec![Vec::new(); node_count],
            outgoing: vec![Vec::new(); node_count],
        }
    }

    /// Builds the declared-dependency graph.
    ///
    /// For activity `i` and predecessor label `l` at position `k`, adds
    /// `l-1 → i`. Labels outside the activity set are skipped.
    pub fn from_activities(activities: &[Activity]) -> Self {
        let mut graph = Self::new(activities.len());
        for (idx, act) in activities.iter().enumerate() {
            for (position, &label) in act.predecessors.iter().enumerate() {
                match label_to_index(label, activities.len()) {
                    Some(pred) => graph.add_edge(pred, idx, Some(position)),
                    None => trace!(activity = idx, label, "skipping unknown predecessor"),
                }
            }
        }
        debug!(
            nodes = graph.node_count,
            edges = graph.edges.len(),
            "built dependency graph"
        );
        graph
    }

    /// Builds the effective-precedence graph of a realized schedule:
    /// `p → i` iff `start_times[p] < start_times[i]`.
    pub fn effective_precedence(start_times: &[f64]) -> Self {
        let mut graph = Self::new(start_times.len());
        for (p, &sp) in start_times.iter().enumerate() {
            for (i, &si) in start_times.iter().enumerate() {
                if sp < si {
                    graph.add_edge(p, i, None);
                }
            }
        }
        graph
    }

    /// Adds an edge. Edges touching unknown nodes are ignored.
    pub fn add_edge(&mut self, from: usize, to: usize, position: Option<usize>) {
        if from >= self.node_count || to >= self.node_count {
            return;
        }
        let id = self.edges.len();
        self.edges.push(Edge { from, to, position });
        self.outgoing[from].push(id);
        self.incoming[to].push(id);
    }

    /// Number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of edges (parallel edges counted separately).
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph has at least one edge.
    #[inline]
    pub fn has_edges(&self) -> bool {
        !self.edges.is_empty()
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Edges into `node`, in insertion order.
    pub fn incoming(&self, node: usize) -> impl Iterator<Item = &Edge> + '_ {
        self.incoming
            .get(node)
            .into_iter()
            .flatten()
            .map(move |&id| &self.edges[id])
    }

    /// Edges out of `node`, in insertion order.
    pub fn outgoing(&self, node: usize) -> impl Iterator<Item = &Edge> + '_ {
        self.outgoing
            .get(node)
            .into_iter()
            .flatten()
            .map(move |&id| &self.edges[id])
    }

    /// 0/1 adjacency matrix: `m[p][i] == 1` iff an edge `p → i` exists.
    pub fn adjacency_matrix(&self) -> Vec<Vec<u8>> {
        let mut m = vec![vec![0u8; self.node_count]; self.node_count];
        for e in &self.edges {
            m[e.from][e.to] = 1;
        }
        m
    }

    /// Topological order of all nodes.
    ///
    /// # Errors
    /// [`ScheduleError::CycleDetected`] if the graph has a cycle; no order
    /// is produced in that case.
    pub fn topological_order(&self) -> Result<Vec<usize>, ScheduleError> {
        if let Some(cycle) = self.find_cycle() {
            let labels: Vec<usize> = cycle.iter().map(|&i| i + 1).collect();
            debug!(?labels, "dependency cycle detected");
            return Err(ScheduleError::CycleDetected { cycle: labels });
        }

        let mut in_degree: Vec<usize> = self.incoming.iter().map(Vec::len).collect();
        let mut ready: BinaryHeap<Reverse<usize>> = in_degree
            .iter()
            .enumerate()
            .filter(|&(_, &d)| d == 0)
            .map(|(i, _)| Reverse(i))
            .collect();

        let mut order = Vec::with_capacity(self.node_count);
        while let Some(Reverse(node)) = ready.pop() {
            order.push(node);
            for e in self.outgoing(node) {
                in_degree[e.to] -= 1;
                if in_degree[e.to] == 0 {
                    ready.push(Reverse(e.to));
                }
            }
        }
        Ok(order)
    }

    /// Finds a cycle, returned as 0-based indices in traversal order.
    ///
    /// A self-loop yields a single-element cycle.
    pub fn find_cycle(&self) -> Option<Vec<usize>> {
        let mut marks = vec![Mark::Unvisited; self.node_count];

        for root in 0..self.node_count {
            if marks[root] != Mark::Unvisited {
                continue;
            }
            // (node, next outgoing slot)
            let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
            marks[root] = Mark::OnStack;

            while let Some(frame) = stack.last_mut() {
                let (node, slot) = *frame;
                match self.outgoing[node].get(slot) {
                    Some(&edge_id) => {
                        frame.1 += 1;
                        let next = self.edges[edge_id].to;
                        match marks[next] {
                            Mark::OnStack => {
                                let start = stack.iter().position(|&(n, _)| n == next)?;
                                return Some(stack[start..].iter().map(|&(n, _)| n).collect());
                            }
                            Mark::Unvisited => {
                                marks[next] = Mark::OnStack;
                                stack.push((next, 0));
                            }
                            Mark::Done => {}
                        }
                    }
                    None => {
                        marks[node] = Mark::Done;
                        stack.pop();
                    }
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Vec<Activity> {
        vec![
            Activity::new("A1").with_duration(5),
            Activity::new("A2").with_duration(3).with_predecessor(1),
            Activity::new("A3").with_duration(2).with_predecessor(2),
        ]
    }

    #[test]
    fn test_build_edges() {
        let g = DependencyGraph::from_activities(&chain());
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(
            g.edges()[0],
            Edge {
                from: 0,
                to: 1,
                position: Some(0)
            }
        );
        assert_eq!(g.adjacency_matrix()[1][2], 1);
        assert_eq!(g.adjacency_matrix()[2][1], 0);
    }

    #[test]
    fn test_unknown_predecessor_skipped() {
        let acts = vec![
            Activity::new("A1").with_predecessor(0),
            Activity::new("A2").with_predecessor(9).with_predecessor(1),
        ];
        let g = DependencyGraph::from_activities(&acts);
        assert_eq!(g.edge_count(), 1);
        // Position counts the skipped entry
        assert_eq!(g.edges()[0].position, Some(1));
    }

    #[test]
    fn test_duplicate_predecessors_kept() {
        let acts = vec![
            Activity::new("A1"),
            Activity::new("A2").with_predecessor(1).with_predecessor(1),
        ];
        let g = DependencyGraph::from_activities(&acts);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.topological_order().unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_topological_order_valid() {
        // A3 ← A1, A2 ← A3
        let acts = vec![
            Activity::new("A1"),
            Activity::new("A2").with_predecessor(3),
            Activity::new("A3").with_predecessor(1),
        ];
        let g = DependencyGraph::from_activities(&acts);
        let order = g.topological_order().unwrap();
        assert_eq!(order, vec![0, 2, 1]);
    }

    #[test]
    fn test_independent_order_by_index() {
        let acts = vec![Activity::new("A1"), Activity::new("A2"), Activity::new("A3")];
        let g = DependencyGraph::from_activities(&acts);
        assert_eq!(g.topological_order().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_two_cycle_detected() {
        let acts = vec![
            Activity::new("A1").with_predecessor(2),
            Activity::new("A2").with_predecessor(1),
        ];
        let g = DependencyGraph::from_activities(&acts);
        assert_eq!(
            g.topological_order(),
            Err(ScheduleError::CycleDetected { cycle: vec![1, 2] })
        );
    }

    #[test]
    fn test_three_cycle_detected() {
        // A1 → A2 → A3 → A1, plus a free activity
        let acts = vec![
            Activity::new("A1").with_predecessor(3),
            Activity::new("A2").with_predecessor(1),
            Activity::new("A3").with_predecessor(2),
            Activity::new("A4"),
        ];
        let g = DependencyGraph::from_activities(&acts);
        let cycle = g.find_cycle().unwrap();
        assert_eq!(cycle, vec![0, 1, 2]);
    }

    #[test]
    fn test_self_loop_detected() {
        let acts = vec![Activity::new("A1"), Activity::new("A2").with_predecessor(2)];
        let g = DependencyGraph::from_activities(&acts);
        assert_eq!(
            g.topological_order(),
            Err(ScheduleError::CycleDetected { cycle: vec![2] })
        );
    }

    #[test]
    fn test_cycle_downstream_of_root() {
        // A1 → A2 ⇄ A3
        let acts = vec![
            Activity::new("A1"),
            Activity::new("A2").with_predecessor(1).with_predecessor(3),
            Activity::new("A3").with_predecessor(2),
        ];
        let g = DependencyGraph::from_activities(&acts);
        assert_eq!(g.find_cycle(), Some(vec![1, 2]));
    }

    #[test]
    fn test_effective_precedence() {
        let g = DependencyGraph::effective_precedence(&[0.0, 5.0, 5.0, 2.0]);
        let m = g.adjacency_matrix();
        assert_eq!(m[0], vec![0, 1, 1, 1]);
        assert_eq!(m[3], vec![0, 1, 1, 0]);
        assert_eq!(m[1][2], 0); // equal starts: no edge
        assert!(g.topological_order().is_ok());
    }

    #[test]
    fn test_empty_graph() {
        let g = DependencyGraph::from_activities(&[]);
        assert_eq!(g.topological_order().unwrap(), Vec::<usize>::new());
        assert!(!g.has_edges());
    }
}
