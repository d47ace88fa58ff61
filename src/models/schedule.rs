//! Schedule (solution) models.
//!
//! A run produces two schedules over the same activity set: the nominal
//! schedule, derived from dependencies alone, and the adjusted schedule,
//! re-derived under daily production constraints. Both are index-based;
//! matrix column `j` stands for the calendar date `project_start + j`.
//!
//! # Reference
//! Kelley & Walker (1959), "Critical-Path Planning and Scheduling"

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{BusinessCalendar, DayMatrix};
use crate::graph::DependencyGraph;
use crate::validation::Diagnostic;

/// Longest duration-weighted chain of activities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalPath {
    /// Activity indices along the path, first to last.
    pub activities: Vec<usize>,
    /// Sum of the path's activity durations (days).
    pub total_days: u32,
}

impl CriticalPath {
    /// 1-based labels along the path.
    pub fn labels(&self) -> Vec<usize> {
        self.activities.iter().map(|&i| i + 1).collect()
    }

    /// Whether `activity` lies on the path.
    pub fn contains(&self, activity: usize) -> bool {
        self.activities.contains(&activity)
    }

    /// Number of activities on the path.
    pub fn len(&self) -> usize {
        self.activities.len()
    }

    /// Whether the path is empty.
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }
}

/// Schedule from dependencies alone (partial progress honored).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NominalSchedule {
    /// Earliest start per activity (days from project start).
    pub start_times: Vec<f64>,
    /// Critical path, absent when there is nothing to schedule.
    pub critical_path: Option<CriticalPath>,
    /// Matrix width `T` (days).
    pub horizon_days: usize,
    /// Production per activity per day.
    pub production: DayMatrix,
}

impl NominalSchedule {
    /// Project completion (days): the critical path total, or 0.
    pub fn completion_days(&self) -> u32 {
        self.critical_path.as_ref().map_or(0, |p| p.total_days)
    }
}

/// Schedule re-derived under production constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustedSchedule {
    /// Adjusted start per activity (full-completion dependencies, blocked days skipped).
    pub start_times: Vec<f64>,
    /// Effective precedence: `p → i` iff `p` starts strictly before `i`.
    pub graph: DependencyGraph,
    /// Critical path over `graph`, absent for degenerate schedules.
    pub critical_path: Option<CriticalPath>,
    /// Production per activity per day, trimmed after the last productive day.
    pub production: DayMatrix,
    /// Activities that reached the safety horizon before producing all units.
    pub unfinished: Vec<usize>,
}

impl AdjustedSchedule {
    /// Realized completion (days): one past the last productive day, or 0.
    pub fn completion_days(&self) -> usize {
        self.production.last_active_day().map_or(0, |d| d + 1)
    }
}

/// Complete result of one scheduling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleReport {
    /// Project start date (day offset 0).
    pub project_start: NaiveDate,
    /// Execution order consistent with declared dependencies.
    pub order: Vec<usize>,
    /// Declared-dependency graph.
    pub graph: DependencyGraph,
    /// Dependency-only schedule.
    pub nominal: NominalSchedule,
    /// Rate multipliers per activity per day, aligned with `nominal.production`.
    pub constraints: DayMatrix,
    /// Constraint-adjusted schedule.
    pub adjusted: AdjustedSchedule,
    /// Non-fatal input issues.
    pub diagnostics: Vec<Diagnostic>,
}

impl ScheduleReport {
    /// Date of matrix column `day`: `project_start + day` calendar days.
    ///
    /// Constraint records are placed on the same grid, so a constraint
    /// covering a date affects the column labelled with that date.
    pub fn column_date(&self, day: usize) -> Option<NaiveDate> {
        self.project_start.checked_add_days(Days::new(u64::try_from(day).ok()?))
    }

    /// Dates labelling the first `days` matrix columns.
    pub fn column_dates(&self, days: usize) -> Vec<NaiveDate> {
        (0..days).map_while(|day| self.column_date(day)).collect()
    }

    /// Columns among the first `days` that fall on non-working dates.
    pub fn non_working_columns(&self, calendar: &BusinessCalendar, days: usize) -> Vec<usize> {
        self.column_dates(days)
            .into_iter()
            .enumerate()
            .filter(|&(_, date)| !calendar.is_business_day(date))
            .map(|(day, _)| day)
            .collect()
    }

    /// Date of an activity's nominal start (fractional days floored).
    pub fn nominal_start_date(&self, activity: usize) -> Option<NaiveDate> {
        let start = *self.nominal.start_times.get(activity)?;
        self.column_date(start.floor().max(0.0) as usize)
    }
}
