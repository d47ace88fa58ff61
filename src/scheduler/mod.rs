//! Scheduling pipeline and its stages.
//!
//! Computes a nominal critical-path schedule with partial-progress
//! dependencies, then re-simulates it under daily production constraints.
//!
//! # Algorithm
//!
//! - `propagation`: forward pass over a topological order. Nominal starts
//!   honor partial progress; adjusted starts require full completion.
//! - `critical_path`: longest duration-weighted path (DP over the order).
//! - `production`: even spread of units over each activity's duration.
//! - `restrictions`: dated constraints mapped onto the day grid.
//! - `adjusted`: blocked-day delays and throttled production.
//! - `engine`: runs the stages in order and assembles a report.
//!
//! # KPI
//!
//! `ScheduleKpi` compares the two schedules: completion, delay, start
//! shifts, and produced units.
//!
//! # References
//!
//! - Kelley & Walker (1959), "Critical-Path Planning and Scheduling"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4

mod adjusted;
mod critical_path;
mod engine;
mod kpi;
mod production;
mod propagation;
mod restrictions;

pub use adjusted::{adjusted_production, adjusted_start_times, simulate_constrained};
pub use critical_path::{adjusted_critical_path, critical_path, longest_path};
pub use engine::{ScheduleEngine, ScheduleRequest};
pub use kpi::ScheduleKpi;
pub use production::nominal_production;
pub use propagation::{nominal_start_times, propagate, DependencyRule};
pub use restrictions::constraint_matrix;
