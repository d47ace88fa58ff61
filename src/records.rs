//! Activity-store records.
//!
//! The store keeps predecessor and progress lists as comma-separated text.
//! This module turns those rows into typed [`Activity`] values so that the
//! scheduler never parses strings.
//!
//! # Parsing Rules
//! - Predecessors: tokens made only of ASCII digits are 1-based labels;
//!   anything else (blank, `nan`, `A3`, `-1`) is dropped.
//! - Progress fractions: blank or unparseable tokens become 1.0, keeping
//!   their position so fractions stay aligned with predecessors.

use serde::{Deserialize, Serialize};

use crate::models::Activity;

/// One activity row as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Activity name.
    pub name: String,
    /// Units to produce.
    pub units: f64,
    /// Duration in days. Missing or negative means 0.
    pub duration: Option<i64>,
    /// Comma-separated predecessor labels.
    pub predecessors: Option<String>,
    /// Comma-separated progress fractions, aligned with `predecessors`.
    pub required_progress: Option<String>,
}

impl ActivityRecord {
    /// Converts the row into a typed activity.
    pub fn into_activity(self) -> Activity {
        let duration_days = self
            .duration
            .unwrap_or(0)
            .clamp(0, i64::from(u32::MAX)) as u32;
        let units_to_produce = if self.units.is_finite() { self.units } else { 0.0 };

        Activity {
            name: self.name,
            units_to_produce,
            duration_days,
            predecessors: self.predecessors.as_deref().map(parse_predecessors).unwrap_or_default(),
            required_progress: self
                .required_progress
                .as_deref()
                .map(parse_progress)
                .unwrap_or_default(),
        }
    }
}

/// Converts store rows into typed activities, preserving order.
pub fn activities_from_records(records: impl IntoIterator<Item = ActivityRecord>) -> Vec<Activity> {
    records.into_iter().map(ActivityRecord::into_activity).collect()
}

/// Parses a predecessor list like `"1, 3,,x"` into `[1, 3]`.
pub fn parse_predecessors(text: &str) -> Vec<usize> {
    text.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty() && t.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|t| t.parse().ok())
        .collect()
}

/// Parses a progress list like `"0.5, ,1"` into `[0.5, 1.0, 1.0]`.
///
/// An entirely blank string yields an empty list.
pub fn parse_progress(text: &str) -> Vec<f64> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    text.split(',')
        .map(str::trim)
        .map(|t| match t.parse::<f64>() {
            Ok(f) if f.is_finite() => f,
            _ => 1.0,
        })
        .collect()
}
