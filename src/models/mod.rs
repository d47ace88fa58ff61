//! Scheduling domain models.
//!
//! Provides the data types for one project snapshot and the schedules
//! derived from it. Everything is index-based: an activity's index is its
//! position in the activity slice, and matrix columns are day offsets from
//! project start.
//!
//! # Domain Mappings
//!
//! | u-cpm | Construction | Manufacturing |
//! |-------|--------------|---------------|
//! | Activity | Work package | Production order |
//! | ProductionConstraint | Site restriction | Line stoppage |
//! | DayMatrix | Daily production plan | Daily output plan |
//! | CriticalPath | Critical chain | Bottleneck route |

mod activity;
mod calendar;
mod constraint;
mod matrix;
mod schedule;

pub use activity::{label_to_index, Activity};
pub use calendar::BusinessCalendar;
pub use constraint::ProductionConstraint;
pub use matrix::DayMatrix;
pub use schedule::{AdjustedSchedule, CriticalPath, NominalSchedule, ScheduleReport};
