//! SeaORM entities for the read-only schedule tables.

pub mod course;
pub mod enrollment;
pub mod schedule;

/// Enrollment status that grants a student access to a course's classes
pub const ENROLLMENT_APPROVED: &str = "approved";
