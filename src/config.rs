//! Engine configuration.
//!
//! All fields have defaults, so a host can deserialize a partial document
//! (e.g. `{"safety_horizon_factor": 3}`) and get a complete config.

use serde::{Deserialize, Serialize};

/// Default multiple of the nominal horizon that the constrained
/// re-simulation may run for.
pub const DEFAULT_SAFETY_HORIZON_FACTOR: usize = 2;

/// Default tolerance for "all units produced" checks.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Scheduling engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// The adjusted production matrix is allocated `factor × T` days wide,
    /// and accumulation stops there even if units remain.
    pub safety_horizon_factor: usize,
    /// Lower bound on the nominal horizon `T`.
    /// `T = max(critical path total, min_horizon_days)`.
    pub min_horizon_days: Option<usize>,
    /// Relative tolerance: outstanding units within `tolerance × max(target, 1)`
    /// count as fully produced.
    pub tolerance: f64,
}

impl EngineConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the safety horizon factor (at least 1).
    pub fn with_safety_horizon_factor(mut self, factor: usize) -> Self {
        self.safety_horizon_factor = factor.max(1);
        self
    }

    /// Sets the minimum horizon.
    pub fn with_min_horizon_days(mut self, days: usize) -> Self {
        self.min_horizon_days = Some(days);
        self
    }

    /// Sets the completion tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Nominal horizon `T` for a given critical path total.
    pub fn horizon_days(&self, critical_days: usize) -> usize {
        critical_days.max(self.min_horizon_days.unwrap_or(0))
    }

    /// Safety bound for the constrained re-simulation.
    pub fn safety_horizon_days(&self, horizon_days: usize) -> usize {
        horizon_days.saturating_mul(self.safety_horizon_factor.max(1))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            safety_horizon_factor: DEFAULT_SAFETY_HORIZON_FACTOR,
            min_horizon_days: None,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}
