//! Structured errors for the scheduling pipeline.
//!
//! Only structural problems are errors. Data-quality issues (unknown
//! references, degenerate activities, malformed fractions) are reported as
//! [`Diagnostic`](crate::validation::Diagnostic) values and never abort a run.

use thiserror::Error;

/// Errors produced by the scheduling pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// The declared dependencies form a cycle.
    ///
    /// `cycle` lists 1-based activity labels in traversal order; the first
    /// label is implicitly repeated at the end.
    #[error("dependency cycle detected: {}", format_cycle(.cycle))]
    CycleDetected { cycle: Vec<usize> },

    /// The declared graph has nothing to schedule (no activities, or no
    /// activity with a positive duration).
    #[error("no critical path: nothing to schedule")]
    NoCriticalPath,

    /// The effective-precedence graph of the constrained schedule has no
    /// edges or no nodes.
    #[error("no adjusted critical path: constrained schedule has no effective precedence")]
    NoAdjustedCriticalPath,
}

impl ScheduleError {
    /// Whether this error aborts the whole computation.
    ///
    /// The two "no path" variants are empty-result signals.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::CycleDetected { .. })
    }
}

fn format_cycle(cycle: &[usize]) -> String {
    let mut labels: Vec<String> = cycle.iter().map(|label| format!("A{label}")).collect();
    if let Some(first) = cycle.first() {
        labels.push(format!("A{first}"));
    }
    labels.join(" -> ")
}
