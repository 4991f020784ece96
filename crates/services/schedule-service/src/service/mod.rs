//! Service layer - business logic.

mod schedule_service;

pub use schedule_service::{ScheduleManager, ScheduleService, WeeklySchedule};
