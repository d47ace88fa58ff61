//! Input diagnostics for scheduling runs.
//!
//! Inspects activities and constraints before scheduling and reports
//! data-quality issues. None of these abort a run: each has a defined
//! fallback that the scheduler applies on its own. Detects:
//! - Predecessor labels outside the activity set
//! - Degenerate activities (no duration or no units)
//! - Progress fractions outside (0, 1]
//! - Constraints naming unknown activities, reversed ranges, bad multipliers
//! - Empty and duplicate activity names
//!
//! Structural problems (dependency cycles) are errors, reported by
//! [`DependencyGraph::topological_order`](crate::graph::DependencyGraph::topological_order).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{label_to_index, Activity, ProductionConstraint};

/// A non-fatal input issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Issue category.
    pub kind: DiagnosticKind,
    /// Index of the affected activity, if any.
    pub activity: Option<usize>,
    /// Human-readable description.
    pub message: String,
}

/// Categories of input issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// A predecessor or constraint references no known activity. Skipped.
    InvalidActivityReference,
    /// Zero duration or non-positive units. Contributes no production.
    DegenerateActivity,
    /// Progress fraction outside (0, 1] or non-finite. Clamped, or 1.0.
    InvalidProgressFraction,
    /// Reversed date range or multiplier outside [0, 1].
    InvalidConstraint,
    /// Two activities share a name; constraints bind to the first.
    DuplicateName,
    /// An activity has a blank name.
    EmptyName,
}

impl Diagnostic {
    fn new(kind: DiagnosticKind, activity: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            kind,
            activity,
            message: message.into(),
        }
    }
}

/// Inspects activities and constraints.
///
/// # Returns
/// All detected issues, in activity order followed by constraint order.
/// An empty vector means clean input.
pub fn inspect(activities: &[Activity], constraints: &[ProductionConstraint]) -> Vec<Diagnostic> {
    let mut issues = inspect_activities(activities);
    issues.extend(inspect_constraints(activities, constraints));
    issues
}

/// Inspects the activity set alone.
pub fn inspect_activities(activities: &[Activity]) -> Vec<Diagnostic> {
    let mut issues = Vec::new();
    let mut first_by_name: HashMap<&str, usize> = HashMap::new();

    for (idx, act) in activities.iter().enumerate() {
        let label = idx + 1;
        let name = act.name.trim();

        if name.is_empty() {
            issues.push(Diagnostic::new(
                DiagnosticKind::EmptyName,
                Some(idx),
                format!("Activity A{label} has no name"),
            ));
        } else if let Some(&first) = first_by_name.get(name) {
            issues.push(Diagnostic::new(
                DiagnosticKind::DuplicateName,
                Some(idx),
                format!(
                    "Activity A{label} shares the name '{name}' with A{}",
                    first + 1
                ),
            ));
        } else {
            first_by_name.insert(name, idx);
        }

        if !act.is_productive() {
            issues.push(Diagnostic::new(
                DiagnosticKind::DegenerateActivity,
                Some(idx),
                format!(
                    "Activity A{label} has duration {} and {} units; it produces nothing",
                    act.duration_days, act.units_to_produce
                ),
            ));
        }

        for &pred in &act.predecessors {
            if label_to_index(pred, activities.len()).is_none() {
                issues.push(Diagnostic::new(
                    DiagnosticKind::InvalidActivityReference,
                    Some(idx),
                    format!("Activity A{label} references unknown predecessor A{pred}"),
                ));
            }
        }

        for (position, &fraction) in act.required_progress.iter().enumerate() {
            if !(fraction.is_finite() && fraction > 0.0 && fraction <= 1.0) {
                issues.push(Diagnostic::new(
                    DiagnosticKind::InvalidProgressFraction,
                    Some(idx),
                    format!(
                        "Activity A{label} requires progress {fraction} at position \
                         {position}; using {}",
                        act.required_progress_at(position)
                    ),
                ));
            }
        }
    }

    issues
}

/// Inspects constraint records against the activity set.
pub fn inspect_constraints(
    activities: &[Activity],
    constraints: &[ProductionConstraint],
) -> Vec<Diagnostic> {
    let mut issues = Vec::new();

    for c in constraints {
        let target = resolve_activity(activities, &c.activity_name);
        if target.is_none() {
            issues.push(Diagnostic::new(
                DiagnosticKind::InvalidActivityReference,
                None,
                format!("Constraint references unknown activity '{}'", c.activity_name),
            ));
        }
        if c.end_date < c.start_date {
            issues.push(Diagnostic::new(
                DiagnosticKind::InvalidConstraint,
                target,
                format!(
                    "Constraint on '{}' ends {} before it starts {}",
                    c.activity_name, c.end_date, c.start_date
                ),
            ));
        }
        if !(c.multiplier.is_finite() && (0.0..=1.0).contains(&c.multiplier)) {
            issues.push(Diagnostic::new(
                DiagnosticKind::InvalidConstraint,
                target,
                format!(
                    "Constraint on '{}' has multiplier {}; using {}",
                    c.activity_name,
                    c.multiplier,
                    c.effective_multiplier()
                ),
            ));
        }
    }

    issues
}

/// Resolves an activity name to the first index with that (trimmed) name.
pub fn resolve_activity(activities: &[Activity], name: &str) -> Option<usize> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    activities.iter().position(|a| a.name.trim() == name)
}
