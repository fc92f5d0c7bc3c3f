use crate::aggregate::join_counts;
use crate::calendar::CalendarRange;
use crate::error::CoreError;
use crate::models::{DayCount, TrackingRecord, TrackingStatus};
use crate::repository::SqliteRepository;
use crate::slot::Slot;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
impl super::TrackingRepository for SqliteRepository {
    async fn upsert_tracking(
        &self,
        task_id: i64,
        date: NaiveDate,
        slot: Slot,
    ) -> Result<TrackingStatus, CoreError> {
        // Single statement: the conflict target is the natural key, so two
        // signals racing on one key still end in `done`.
        let status: TrackingStatus = sqlx::query_scalar(
            r#"INSERT INTO task_tracking (task_id, date, slot, status)
            VALUES ($1, $2, $3, 'active')
            ON CONFLICT (task_id, date, slot) DO UPDATE SET status = 'done'
            RETURNING status
            "#,
        )
        .bind(task_id)
        .bind(date)
        .bind(slot)
        .fetch_one(self.pool())
        .await
        .map_err(|e| CoreError::from_write(e, task_id))?;

        Ok(status)
    }

    async fn find_tracking_on(&self, date: NaiveDate) -> Result<Vec<TrackingRecord>, CoreError> {
        let records = sqlx::query_as(
            r#"SELECT task_id, date, slot, status
            FROM task_tracking
            WHERE date = $1
            ORDER BY slot, task_id
            "#,
        )
        .bind(date)
        .fetch_all(self.pool())
        .await?;
        Ok(records)
    }

    async fn find_tracking_in(&self, range: &CalendarRange) -> Result<Vec<TrackingRecord>, CoreError> {
        let (Some(start), Some(end)) = (range.start(), range.end()) else {
            return Ok(Vec::new());
        };

        let records = sqlx::query_as(
            r#"SELECT task_id, date, slot, status
            FROM task_tracking
            WHERE date BETWEEN $1 AND $2
            ORDER BY date, slot, task_id
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(self.pool())
        .await?;
        Ok(records)
    }

    async fn count_tracking_in(&self, range: &CalendarRange) -> Result<Vec<DayCount>, CoreError> {
        let (Some(start), Some(end)) = (range.start(), range.end()) else {
            return Ok(Vec::new());
        };

        let sparse: Vec<DayCount> = sqlx::query_as(
            r#"SELECT date, COUNT(id) AS count
            FROM task_tracking
            WHERE date BETWEEN $1 AND $2
            GROUP BY date
            ORDER BY date
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(self.pool())
        .await?;
        Ok(join_counts(range, sparse))
    }
}
