use crate::calendar::CalendarRange;
use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{DayCount, NewTaskData, Task, TaskFilter, TrackingRecord, TrackingStatus};
use crate::slot::Slot;
use async_trait::async_trait;
use chrono::NaiveDate;

pub mod tasks;
pub mod tracking;

/// Domain-specific trait for task operations
#[async_trait]
pub trait TaskRepository {
    async fn add_task(&self, data: NewTaskData) -> Result<Task, CoreError>;
    async fn find_task_by_id(&self, id: i64) -> Result<Option<Task>, CoreError>;
    async fn find_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, CoreError>;
    async fn find_tasks_created_in(&self, range: &CalendarRange) -> Result<Vec<Task>, CoreError>;
    async fn increment_actual(&self, id: i64) -> Result<Task, CoreError>;
    async fn set_estimate(&self, id: i64, estimate: i64) -> Result<Task, CoreError>;
    async fn set_done(&self, id: i64) -> Result<Task, CoreError>;
    async fn delete_task(&self, id: i64) -> Result<(), CoreError>;
}

/// Domain-specific trait for half-hour tracking records
#[async_trait]
pub trait TrackingRepository {
    /// Applies one activation signal to `(task_id, date, slot)` atomically and
    /// returns the status the record ends up in.
    async fn upsert_tracking(
        &self,
        task_id: i64,
        date: NaiveDate,
        slot: Slot,
    ) -> Result<TrackingStatus, CoreError>;
    async fn find_tracking_on(&self, date: NaiveDate) -> Result<Vec<TrackingRecord>, CoreError>;
    async fn find_tracking_in(&self, range: &CalendarRange) -> Result<Vec<TrackingRecord>, CoreError>;
    /// Record count for every date of `range`, zero where nothing was tracked.
    async fn count_tracking_in(&self, range: &CalendarRange) -> Result<Vec<DayCount>, CoreError>;
}

/// Main repository trait that composes all domain traits
#[async_trait]
pub trait Repository: TaskRepository + TrackingRepository + Sync {}

/// SQLite implementation of the repository pattern
pub struct SqliteRepository {
    pool: DbPool,
}

impl SqliteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the database pool for internal use across modules
    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl Repository for SqliteRepository {}
