//! Weekly schedule window.
//!
//! Every dashboard scopes its schedule query to a Sunday-to-Saturday week
//! selected by an integer offset from the current week. This module is the
//! single place that arithmetic lives.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::constants::DAYS_PER_WEEK;

/// A Sunday-to-Saturday calendar week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct WeekWindow {
    /// Offset from the current week that produced this window
    pub week_offset: i64,
    /// Sunday starting the week (YYYY-MM-DD)
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2024-06-09"))]
    pub start_date: NaiveDate,
    /// Saturday ending the week (YYYY-MM-DD)
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2024-06-15"))]
    pub end_date: NaiveDate,
    /// Human readable range, e.g. "Jun 9 - Jun 15, 2024"
    pub display_range: String,
}

impl WeekWindow {
    /// Window for an already-parsed offset relative to the week containing `today`.
    ///
    /// An offset that would leave chrono's representable range selects the
    /// current week instead.
    pub fn for_offset(today: NaiveDate, week_offset: i64) -> Self {
        let current_start = week_start(today);

        shift_weeks(current_start, week_offset)
            .and_then(|start| Self::build(start, week_offset))
            .or_else(|| Self::build(current_start, 0))
            .unwrap_or_else(|| Self::degenerate(current_start))
    }

    /// Whether `date` falls inside the window (inclusive on both ends).
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    fn build(start_date: NaiveDate, week_offset: i64) -> Option<Self> {
        let end_date = start_date.checked_add_days(Days::new(6))?;
        Some(Self {
            week_offset,
            start_date,
            end_date,
            display_range: display_range(start_date, end_date),
        })
    }

    // Only reachable for a `today` within a week of NaiveDate::MAX.
    fn degenerate(start_date: NaiveDate) -> Self {
        Self {
            week_offset: 0,
            start_date,
            end_date: start_date,
            display_range: display_range(start_date, start_date),
        }
    }
}

/// Compute the week window for an untrusted offset parameter.
///
/// Missing or malformed offsets select the current week. Never panics.
pub fn compute_week(today: NaiveDate, week_offset_raw: Option<&str>) -> WeekWindow {
    WeekWindow::for_offset(today, parse_week_offset(week_offset_raw))
}

/// Parse an untrusted week offset, defaulting to 0.
pub fn parse_week_offset(raw: Option<&str>) -> i64 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .unwrap_or(0)
}

/// Sunday on or before `date`.
fn week_start(date: NaiveDate) -> NaiveDate {
    let back = u64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_days(Days::new(back)).unwrap_or(date)
}

/// Move a week start by whole weeks in one step.
fn shift_weeks(start: NaiveDate, weeks: i64) -> Option<NaiveDate> {
    let days = weeks.checked_mul(DAYS_PER_WEEK)?;
    let magnitude = Days::new(days.unsigned_abs());
    if days >= 0 {
        start.checked_add_days(magnitude)
    } else {
        start.checked_sub_days(magnitude)
    }
}

fn display_range(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} - {}", start.format("%b %-d"), end.format("%b %-d, %Y"))
}
