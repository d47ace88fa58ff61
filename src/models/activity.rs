//! Activity model.
//!
//! An activity is a unit of production work: it produces a number of units
//! over a whole number of working days, and may depend on other activities
//! reaching a fraction of their duration before it can start.
//!
//! # Indexing
//! An activity's index is its 0-based position in the activity slice.
//! Predecessors are referenced by 1-based *labels* (`A1`, `A2`, ...), the
//! way they are entered; label `n` refers to index `n - 1`.
//!
//! # Reference
//! Kelley & Walker (1959), "Critical-Path Planning and Scheduling"

use serde::{Deserialize, Serialize};

/// A production activity.
///
/// # Partial Progress
/// `required_progress[k]` is the fraction of predecessor `predecessors[k]`'s
/// duration that must elapse before this activity may start. Missing
/// entries mean full completion (1.0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Display name. May be empty; constraints join on it.
    pub name: String,
    /// Total units to produce over the activity's duration.
    pub units_to_produce: f64,
    /// Duration in working days. Zero means no production.
    pub duration_days: u32,
    /// 1-based labels of predecessor activities, in entry order.
    pub predecessors: Vec<usize>,
    /// Required progress per predecessor, aligned with `predecessors`.
    #[serde(default)]
    pub required_progress: Vec<f64>,
}

impl Activity {
    /// Creates an activity with no units, no duration and no predecessors.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            units_to_produce: 0.0,
            duration_days: 0,
            predecessors: Vec::new(),
            required_progress: Vec::new(),
        }
    }

    /// Sets the units to produce.
    pub fn with_units(mut self, units: f64) -> Self {
        self.units_to_produce = units;
        self
    }

    /// Sets the duration in days.
    pub fn with_duration(mut self, days: u32) -> Self {
        self.duration_days = days;
        self
    }

    /// Adds a predecessor that must fully finish first.
    pub fn with_predecessor(mut self, label: usize) -> Self {
        self.predecessors.push(label);
        self
    }

    /// Adds a predecessor that must reach `fraction` of its duration first.
    pub fn with_partial_predecessor(mut self, label: usize, fraction: f64) -> Self {
        self.required_progress.resize(self.predecessors.len(), 1.0);
        self.predecessors.push(label);
        self.required_progress.push(fraction);
        self
    }

    /// Required progress for the predecessor at `position`.
    ///
    /// Missing or non-finite entries default to 1.0; finite values are
    /// clamped into `[0, 1]`.
    pub fn required_progress_at(&self, position: usize) -> f64 {
        match self.required_progress.get(position) {
            Some(&f) if f.is_finite() => f.clamp(0.0, 1.0),
            _ => 1.0,
        }
    }

    /// Whether this activity contributes production (positive duration and units).
    pub fn is_productive(&self) -> bool {
        self.duration_days > 0 && self.units_to_produce.is_finite() && self.units_to_produce > 0.0
    }

    /// Constant nominal production rate (units/day), if productive.
    pub fn daily_rate(&self) -> Option<f64> {
        if self.is_productive() {
            Some(self.units_to_produce / f64::from(self.duration_days))
        } else {
            None
        }
    }
}

/// Converts a 1-based label to an index, if it falls within `len` activities.
#[inline]
pub fn label_to_index(label: usize, len: usize) -> Option<usize> {
    label.checked_sub(1).filter(|&idx| idx < len)
}
