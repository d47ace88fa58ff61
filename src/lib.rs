//! Critical-path scheduling with partial progress and production constraints.
//!
//! Computes when each activity of a construction-style project can start,
//! given that a dependent may begin once a predecessor reaches a required
//! fraction of completion, and how the schedule shifts when daily
//! production is throttled or blocked over date ranges.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Activity`, `ProductionConstraint`,
//!   `DayMatrix`, `BusinessCalendar`, schedules and the run report
//! - **`graph`**: Dependency graph, topological order, cycle detection
//! - **`scheduler`**: Propagation, critical path, production matrices,
//!   constrained re-simulation, the pipeline engine, KPIs
//! - **`validation`**: Non-fatal input diagnostics
//! - **`records`**: Parsing of flat activity records
//! - **`config`**: Engine tuning
//! - **`generator`**: Seeded synthetic projects
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use u_cpm::models::{Activity, ProductionConstraint};
//! use u_cpm::ScheduleEngine;
//!
//! let activities = vec![
//!     Activity::new("A1").with_units(100.0).with_duration(5),
//!     Activity::new("A2").with_units(60.0).with_duration(3).with_predecessor(1),
//! ];
//! let start = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
//! let blocked = ProductionConstraint::blocked("A1", start, start);
//!
//! let report = ScheduleEngine::new().schedule(&activities, &[blocked], start).unwrap();
//! assert_eq!(report.nominal.completion_days(), 8);
//! assert_eq!(report.adjusted.start_times, vec![1.0, 6.0]);
//! ```
//!
//! # References
//!
//! - Kelley & Walker (1959), "Critical-Path Planning and Scheduling"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod config;
pub mod error;
pub mod generator;
pub mod graph;
pub mod models;
pub mod records;
pub mod scheduler;
pub mod validation;

pub use config::EngineConfig;
pub use error::ScheduleError;
pub use scheduler::{ScheduleEngine, ScheduleKpi, ScheduleRequest};
