//! Day-indexed activity matrices.
//!
//! Production and constraint matrices share one layout: one row per
//! activity, one column per working day offset from project start.

use serde::{Deserialize, Serialize};

/// Dense `activities × days` matrix of `f64`, row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayMatrix {
    rows: usize,
    days: usize,
    values: Vec<f64>,
}

impl DayMatrix {
    /// Creates a matrix with every cell set to `fill`.
    pub fn filled(rows: usize, days: usize, fill: f64) -> Self {
        Self {
            rows,
            days,
            values: vec![fill; rows * days],
        }
    }

    /// Creates an all-zero matrix.
    pub fn zeros(rows: usize, days: usize) -> Self {
        Self::filled(rows, days, 0.0)
    }

    /// Number of activity rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of day columns.
    #[inline]
    pub fn days(&self) -> usize {
        self.days
    }

    /// Cell value, or `None` outside the matrix.
    #[inline]
    pub fn get(&self, row: usize, day: usize) -> Option<f64> {
        if row < self.rows && day < self.days {
            Some(self.values[row * self.days + day])
        } else {
            None
        }
    }

    /// Sets a cell. Writes outside the matrix are ignored.
    #[inline]
    pub fn set(&mut self, row: usize, day: usize, value: f64) {
        if row < self.rows && day < self.days {
            self.values[row * self.days + day] = value;
        }
    }

    /// One activity's row.
    pub fn row(&self, row: usize) -> &[f64] {
        if row < self.rows {
            &self.values[row * self.days..(row + 1) * self.days]
        } else {
            &[]
        }
    }

    /// Sum of one activity's row.
    pub fn row_total(&self, row: usize) -> f64 {
        self.row(row).iter().sum()
    }

    /// Sum of each day column across all activities.
    pub fn column_totals(&self) -> Vec<f64> {
        (0..self.days)
            .map(|d| (0..self.rows).map(|r| self.values[r * self.days + d]).sum())
            .collect()
    }

    /// Last day column holding any nonzero entry.
    pub fn last_active_day(&self) -> Option<usize> {
        (0..self.days)
            .rev()
            .find(|&d| (0..self.rows).any(|r| self.values[r * self.days + d] != 0.0))
    }

    /// Copy keeping only the first `days` columns (zero-padded if wider).
    pub fn truncated(&self, days: usize) -> Self {
        let mut out = Self::zeros(self.rows, days);
        let keep = days.min(self.days);
        for r in 0..self.rows {
            out.values[r * days..r * days + keep].copy_from_slice(&self.row(r)[..keep]);
        }
        out
    }

    /// Copy trimmed after the last active day, or cut to `fallback_days`
    /// if no cell is nonzero.
    pub fn trimmed(&self, fallback_days: usize) -> Self {
        match self.last_active_day() {
            Some(last) => self.truncated(last + 1),
            None => self.truncated(fallback_days),
        }
    }

    /// Rows as owned vectors, for export.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows).map(|r| self.row(r).to_vec()).collect()
    }
}
