//! Scheduling pipeline.
//!
//! # Algorithm
//!
//! 1. Inspect inputs for non-fatal issues.
//! 2. Build the dependency graph; abort on a cycle.
//! 3. Propagate nominal start times (partial progress).
//! 4. Extract the critical path; its total sets the horizon `T`.
//! 5. Synthesize the nominal production matrix over `T` days.
//! 6. Map constraints onto a `T`-day multiplier matrix.
//! 7. Re-simulate under constraints.
//!
//! Each run is a pure function of its inputs: nothing is retained between
//! calls and caller data is never mutated.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::adjusted::simulate_constrained;
use super::critical_path::critical_path;
use super::production::nominal_production;
use super::propagation::nominal_start_times;
use super::restrictions::constraint_matrix;
use crate::config::EngineConfig;
use crate::error::ScheduleError;
use crate::graph::DependencyGraph;
use crate::models::{Activity, NominalSchedule, ProductionConstraint, ScheduleReport};
use crate::validation;

/// Input snapshot for one scheduling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// Activities, indexed by position.
    pub activities: Vec<Activity>,
    /// Production constraints, applied in order.
    #[serde(default)]
    pub constraints: Vec<ProductionConstraint>,
    /// Date of day offset 0.
    pub project_start: NaiveDate,
}

impl ScheduleRequest {
    /// Creates a request with no constraints.
    pub fn new(activities: Vec<Activity>, project_start: NaiveDate) -> Self {
        Self {
            activities,
            constraints: Vec::new(),
            project_start,
        }
    }

    /// Sets the constraints.
    pub fn with_constraints(mut self, constraints: Vec<ProductionConstraint>) -> Self {
        self.constraints = constraints;
        self
    }

    /// Adds one constraint.
    pub fn with_constraint(mut self, constraint: ProductionConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }
}

/// Critical-path scheduler with partial progress and production constraints.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_cpm::models::Activity;
/// use u_cpm::scheduler::{ScheduleEngine, ScheduleRequest};
///
/// let activities = vec![
///     Activity::new("Excavation").with_units(100.0).with_duration(5),
///     Activity::new("Foundation").with_units(60.0).with_duration(3).with_predecessor(1),
///     Activity::new("Formwork")
///         .with_units(20.0)
///         .with_duration(2)
///         .with_partial_predecessor(1, 0.5),
/// ];
/// let start = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
/// let request = ScheduleRequest::new(activities, start);
///
/// let report = ScheduleEngine::new().schedule_request(&request).unwrap();
/// assert_eq!(report.nominal.start_times, vec![0.0, 5.0, 2.5]);
/// assert_eq!(report.nominal.completion_days(), 8);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScheduleEngine {
    config: EngineConfig,
}

impl ScheduleEngine {
    /// Creates an engine with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs the full pipeline.
    ///
    /// # Errors
    /// [`ScheduleError::CycleDetected`] if the declared dependencies form a
    /// cycle. Missing critical paths are reported as `None` in the result.
    pub fn schedule(
        &self,
        activities: &[Activity],
        constraints: &[ProductionConstraint],
        project_start: NaiveDate,
    ) -> Result<ScheduleReport, ScheduleError> {
        let diagnostics = validation::inspect(activities, constraints);
        let (order, graph, nominal) = self.nominal(activities)?;

        let restrictions =
            constraint_matrix(activities, constraints, project_start, nominal.horizon_days);
        let adjusted =
            simulate_constrained(activities, &order, &graph, &restrictions, &self.config);

        debug!(
            activities = activities.len(),
            constraints = constraints.len(),
            nominal_days = nominal.completion_days(),
            adjusted_days = adjusted.completion_days(),
            unfinished = adjusted.unfinished.len(),
            "schedule computed"
        );

        Ok(ScheduleReport {
            project_start,
            order,
            graph,
            nominal,
            constraints: restrictions,
            adjusted,
            diagnostics,
        })
    }

    /// Runs the full pipeline on a request.
    pub fn schedule_request(
        &self,
        request: &ScheduleRequest,
    ) -> Result<ScheduleReport, ScheduleError> {
        self.schedule(&request.activities, &request.constraints, request.project_start)
    }

    /// Computes the nominal (unconstrained) schedule only.
    ///
    /// Returns the topological order, the declared graph, and the schedule.
    pub fn nominal(
        &self,
        activities: &[Activity],
    ) -> Result<(Vec<usize>, DependencyGraph, NominalSchedule), ScheduleError> {
        let graph = DependencyGraph::from_activities(activities);
        let order = graph.topological_order()?;
        let start_times = nominal_start_times(activities, &order, &graph);

        let critical_path = match critical_path(activities, &graph, &order) {
            Ok(path) => Some(path),
            Err(err) => {
                debug!(%err, "nominal schedule has no critical path");
                None
            }
        };
        let critical_days = critical_path.as_ref().map_or(0, |p| p.total_days as usize);
        let horizon_days = self.config.horizon_days(critical_days);
        let production = nominal_production(activities, &start_times, horizon_days);

        Ok((
            order,
            graph,
            NominalSchedule {
                start_times,
                critical_path,
                horizon_days,
                production,
            },
        ))
    }
}
