//! Schedule repository implementation.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    QueryTrait, Select,
};
use serde::Serialize;
use tracing::warn;

use super::entities::{course, enrollment, schedule, ENROLLMENT_APPROVED};
use common::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// One class meeting as shown on a dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub id: i64,
    pub course_id: i64,
    pub course_name: String,
    pub teacher_id: i64,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2024-06-12"))]
    pub date: NaiveDate,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "09:00:00"))]
    pub start_time: NaiveTime,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "10:30:00"))]
    pub end_time: NaiveTime,
    pub room: Option<String>,
}

impl ScheduleEntry {
    fn from_row((row, course): (schedule::Model, Option<course::Model>)) -> Self {
        let course_name = match course {
            Some(course) => course.name,
            None => {
                warn!(
                    schedule_id = row.id,
                    course_id = row.course_id,
                    "Schedule row has no course"
                );
                String::new()
            }
        };

        Self {
            id: row.id,
            course_id: row.course_id,
            course_name,
            teacher_id: row.teacher_id,
            date: row.class_date,
            start_time: row.start_time,
            end_time: row.end_time,
            room: row.room,
        }
    }
}

/// Schedule repository trait for dependency injection.
///
/// Date bounds are inclusive.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Every class between two dates
    async fn list_between(&self, start: NaiveDate, end: NaiveDate)
        -> AppResult<Vec<ScheduleEntry>>;

    /// Classes taught by one teacher
    async fn list_for_teacher(
        &self,
        teacher_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<ScheduleEntry>>;

    /// Classes of courses the student is approved for
    async fn list_for_student(
        &self,
        student_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<ScheduleEntry>>;
}

/// Concrete implementation of ScheduleRepository
pub struct ScheduleStore {
    db: DatabaseConnection,
}

impl ScheduleStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn in_window(start: NaiveDate, end: NaiveDate) -> Select<schedule::Entity> {
        schedule::Entity::find()
            .filter(schedule::Column::ClassDate.between(start, end))
            .order_by_asc(schedule::Column::ClassDate)
            .order_by_asc(schedule::Column::StartTime)
            .order_by_asc(schedule::Column::Id)
    }

    async fn fetch(&self, query: Select<schedule::Entity>) -> AppResult<Vec<ScheduleEntry>> {
        let rows = query
            .find_also_related(course::Entity)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows.into_iter().map(ScheduleEntry::from_row).collect())
    }
}

#[async_trait]
impl ScheduleRepository for ScheduleStore {
    async fn list_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<ScheduleEntry>> {
        self.fetch(Self::in_window(start, end)).await
    }

    async fn list_for_teacher(
        &self,
        teacher_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<ScheduleEntry>> {
        let query = Self::in_window(start, end).filter(schedule::Column::TeacherId.eq(teacher_id));
        self.fetch(query).await
    }

    async fn list_for_student(
        &self,
        student_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<ScheduleEntry>> {
        let approved_courses = enrollment::Entity::find()
            .select_only()
            .column(enrollment::Column::CourseId)
            .filter(enrollment::Column::StudentId.eq(student_id))
            .filter(enrollment::Column::Status.eq(ENROLLMENT_APPROVED))
            .into_query();

        let query = Self::in_window(start, end)
            .filter(schedule::Column::CourseId.in_subquery(approved_courses));
        self.fetch(query).await
    }
}
