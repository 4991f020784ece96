//! Schedule Service Library
//!
//! Weekly class schedules for the admin, teacher and student dashboards.
//! Every view is scoped by the shared week window.

pub mod repository;
pub mod service;

pub use repository::{ScheduleEntry, ScheduleRepository, ScheduleStore};
pub use service::{ScheduleManager, ScheduleService, WeeklySchedule};

#[cfg(any(test, feature = "test-utils"))]
pub use repository::MockScheduleRepository;
