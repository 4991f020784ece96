//! Weekly schedule views.
//!
//! All three dashboards share one week window. Only the repository query
//! differs by role.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use common::AppResult;
use domain::{compute_week, Clock, Role, WeekWindow};

use crate::repository::{ScheduleEntry, ScheduleRepository};

/// A week window and the classes that fall inside it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct WeeklySchedule {
    pub week: WeekWindow,
    pub entries: Vec<ScheduleEntry>,
}

/// Schedule service trait for dependency injection.
#[async_trait]
pub trait ScheduleService: Send + Sync {
    /// Window for the raw `weekOffset` input relative to today
    fn week(&self, week_offset_raw: Option<&str>) -> WeekWindow;

    /// Classes visible to the viewer in the requested week
    async fn weekly_schedule(
        &self,
        viewer_id: i64,
        role: Role,
        week_offset_raw: Option<&str>,
    ) -> AppResult<WeeklySchedule>;
}

/// Concrete implementation of ScheduleService.
pub struct ScheduleManager {
    repo: Arc<dyn ScheduleRepository>,
    clock: Arc<dyn Clock>,
}

impl ScheduleManager {
    pub fn new(repo: Arc<dyn ScheduleRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

#[async_trait]
impl ScheduleService for ScheduleManager {
    fn week(&self, week_offset_raw: Option<&str>) -> WeekWindow {
        compute_week(self.clock.today(), week_offset_raw)
    }

    async fn weekly_schedule(
        &self,
        viewer_id: i64,
        role: Role,
        week_offset_raw: Option<&str>,
    ) -> AppResult<WeeklySchedule> {
        let week = self.week(week_offset_raw);
        let (start, end) = (week.start_date, week.end_date);

        let mut entries = match role {
            Role::Admin => self.repo.list_between(start, end).await?,
            Role::Teacher => self.repo.list_for_teacher(viewer_id, start, end).await?,
            Role::Student => self.repo.list_for_student(viewer_id, start, end).await?,
        };
        entries.retain(|entry| week.contains(entry.date));
        entries.sort_by_key(|entry| (entry.date, entry.start_time, entry.id));

        debug!(
            user_id = viewer_id,
            role = %role,
            week_offset = week.week_offset,
            count = entries.len(),
            "Weekly schedule loaded"
        );

        Ok(WeeklySchedule { week, entries })
    }
}
