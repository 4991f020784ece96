//! Source of "today" for date-scoped queries.

use chrono::{FixedOffset, NaiveDate, Offset, Utc};

/// Supplies the current calendar date.
pub trait Clock: Send + Sync {
    /// Current date in the clock's reference calendar
    fn today(&self) -> NaiveDate;
}

/// Wall clock read in a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    /// Clock in UTC
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Clock shifted by `minutes` east of UTC. Out of range offsets fall back to UTC.
    pub fn with_offset_minutes(minutes: i32) -> Self {
        let offset = minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix());
        Self { offset }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::utc()
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.offset).date_naive()
    }
}

/// Clock pinned to one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
