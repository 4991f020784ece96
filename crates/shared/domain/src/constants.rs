//! Domain-level constants.

// Roles, as stored in `users.role`
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_TEACHER: &str = "teacher";
pub const ROLE_STUDENT: &str = "student";

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Minimum display name length, counted after trimming
pub const MIN_NAME_LENGTH: usize = 1;

/// Default session lifetime in hours
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

pub const SECONDS_PER_HOUR: i64 = 3600;

/// `token_type` reported with a new session
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

pub const DAYS_PER_WEEK: i64 = 7;
