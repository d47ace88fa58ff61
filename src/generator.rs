//! Synthetic project generation.
//!
//! Produces seeded, reproducible activity sets and constraint sets for
//! testing and benchmarking. Generated activity sets are always acyclic:
//! activity `i` only depends on lower-indexed activities.

use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::models::{Activity, ProductionConstraint};

/// Parameters for synthetic projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of activities.
    pub activities: usize,
    /// Longest activity duration (days).
    pub max_duration: u32,
    /// Largest unit count.
    pub max_units: f64,
    /// Most predecessors per activity.
    pub max_predecessors: usize,
    /// Chance that a predecessor only needs partial progress.
    pub partial_probability: f64,
    /// Chance that an activity has zero duration.
    pub zero_duration_probability: f64,
    /// Chance that a generated constraint fully blocks production.
    pub block_probability: f64,
    /// RNG seed.
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            activities: 12,
            max_duration: 10,
            max_units: 500.0,
            max_predecessors: 3,
            partial_probability: 0.3,
            zero_duration_probability: 0.05,
            block_probability: 0.5,
            seed: 42,
        }
    }
}

impl GeneratorConfig {
    /// Sets the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the number of activities.
    pub fn with_activities(mut self, activities: usize) -> Self {
        self.activities = activities;
        self
    }

    /// Disables partial-progress dependencies.
    pub fn full_completion_only(mut self) -> Self {
        self.partial_probability = 0.0;
        self
    }
}

/// Seeded generator of activity and constraint sets.
#[derive(Debug, Clone)]
pub struct ProjectGenerator {
    config: GeneratorConfig,
    rng: StdRng,
}

impl ProjectGenerator {
    /// Creates a generator from a config.
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self { config, rng }
    }

    /// Generates an acyclic activity set named `A1..An`.
    pub fn activities(&mut self) -> Vec<Activity> {
        let cfg = &self.config;
        let mut out = Vec::with_capacity(cfg.activities);

        for idx in 0..cfg.activities {
            let duration = if self.rng.random_bool(cfg.zero_duration_probability.clamp(0.0, 1.0)) {
                0
            } else {
                self.rng.random_range(1..=cfg.max_duration.max(1))
            };
            let units = (self.rng.random_range(1.0..=cfg.max_units.max(1.0)) * 10.0).round() / 10.0;
            let mut act = Activity::new(format!("A{}", idx + 1))
                .with_units(units)
                .with_duration(duration);

            if idx > 0 {
                let count = self.rng.random_range(0..=cfg.max_predecessors.min(idx));
                for _ in 0..count {
                    let label = self.rng.random_range(1..=idx);
                    if self.rng.random_bool(cfg.partial_probability.clamp(0.0, 1.0)) {
                        let fraction = f64::from(self.rng.random_range(1..=10u32)) / 10.0;
                        act = act.with_partial_predecessor(label, fraction);
                    } else {
                        act = act.with_predecessor(label);
                    }
                }
            }
            out.push(act);
        }

        out
    }

    /// Generates `count` constraints against `activities`, with ranges
    /// starting within `horizon_days` of `project_start`.
    pub fn constraints(
        &mut self,
        activities: &[Activity],
        project_start: NaiveDate,
        horizon_days: usize,
        count: usize,
    ) -> Vec<ProductionConstraint> {
        if activities.is_empty() {
            return Vec::new();
        }
        let span = u64::try_from(horizon_days.max(1)).unwrap_or(u64::MAX);
        let mut out = Vec::with_capacity(count);

        for _ in 0..count {
            let target = &activities[self.rng.random_range(0..activities.len())];
            let offset = self.rng.random_range(0..span);
            let length = self.rng.random_range(0..5u64);
            let (Some(start), Some(end)) = (
                project_start.checked_add_days(Days::new(offset)),
                project_start.checked_add_days(Days::new(offset + length)),
            ) else {
                continue;
            };
            let block = self.config.block_probability.clamp(0.0, 1.0);
            let multiplier = if self.rng.random_bool(block) {
                0.0
            } else {
                f64::from(self.rng.random_range(1..=9u32)) / 10.0
            };
            out.push(ProductionConstraint::new(target.name.clone(), start, end, multiplier));
        }

        out
    }
}
