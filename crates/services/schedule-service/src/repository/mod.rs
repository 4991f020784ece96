//! Repository layer for schedule data.

pub mod entities;
mod schedule_repository;

pub use schedule_repository::{ScheduleEntry, ScheduleRepository, ScheduleStore};

#[cfg(any(test, feature = "test-utils"))]
pub use schedule_repository::MockScheduleRepository;
