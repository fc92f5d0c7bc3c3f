use crate::calendar::CalendarRange;
use crate::error::CoreError;
use crate::models::{NewTaskData, StatusFilter, Task, TaskFilter};
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use chrono::{Local, NaiveDateTime, Timelike};
use sqlx::{QueryBuilder, Sqlite};

/// Current local wall-clock time, truncated to whole seconds.
fn local_now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

fn validate_estimate(estimate: i64) -> Result<(), CoreError> {
    if estimate < 0 {
        return Err(CoreError::InvalidInput(format!(
            "Estimate must not be negative (got {})",
            estimate
        )));
    }
    Ok(())
}

#[async_trait]
impl super::TaskRepository for SqliteRepository {
    async fn add_task(&self, data: NewTaskData) -> Result<Task, CoreError> {
        let name = data.name.trim();
        if name.is_empty() {
            return Err(CoreError::InvalidInput(
                "Task name cannot be empty".to_string(),
            ));
        }
        validate_estimate(data.estimate)?;

        let created_at = data.created_at.unwrap_or_else(local_now);
        let task: Task = sqlx::query_as(
            r#"INSERT INTO tasks (name, estimate, actual, created_at, updated_at, done)
            VALUES ($1, $2, 0, $3, $3, 0)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(data.estimate)
        .bind(created_at)
        .fetch_one(self.pool())
        .await?;

        tracing::debug!(id = task.id, name = %task.name, estimate = task.estimate, "task added");
        Ok(task)
    }

    async fn find_task_by_id(&self, id: i64) -> Result<Option<Task>, CoreError> {
        let task = sqlx::query_as("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(task)
    }

    async fn find_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, CoreError> {
        let mut query_builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT * FROM tasks WHERE 1 = 1");

        if let Some(since) = filter.since {
            query_builder.push(" AND date(created_at) >= ");
            query_builder.push_bind(since);
        }

        match filter.status {
            StatusFilter::All => {}
            StatusFilter::Wip => {
                query_builder.push(" AND done = 0 AND actual > 0");
            }
            StatusFilter::Todo => {
                query_builder.push(" AND done = 0 AND actual = 0");
            }
            StatusFilter::Done => {
                query_builder.push(" AND done = 1");
            }
        }

        query_builder.push(" ORDER BY created_at DESC, id DESC");

        let tasks = query_builder
            .build_query_as::<Task>()
            .fetch_all(self.pool())
            .await?;
        Ok(tasks)
    }

    async fn find_tasks_created_in(&self, range: &CalendarRange) -> Result<Vec<Task>, CoreError> {
        let (Some(start), Some(end)) = (range.start(), range.end()) else {
            return Ok(Vec::new());
        };

        let tasks = sqlx::query_as(
            r#"SELECT * FROM tasks
            WHERE date(created_at) BETWEEN $1 AND $2
            ORDER BY created_at, id
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(self.pool())
        .await?;
        Ok(tasks)
    }

    async fn increment_actual(&self, id: i64) -> Result<Task, CoreError> {
        let task: Task = sqlx::query_as(
            r#"UPDATE tasks
            SET actual = actual + 1, updated_at = $1
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(local_now())
        .bind(id)
        .fetch_optional(self.pool())
        .await?
        .ok_or_else(|| CoreError::task_not_found(id))?;

        tracing::debug!(id, actual = task.actual, "actual incremented");
        Ok(task)
    }

    async fn set_estimate(&self, id: i64, estimate: i64) -> Result<Task, CoreError> {
        validate_estimate(estimate)?;

        let task: Task = sqlx::query_as(
            r#"UPDATE tasks
            SET estimate = $1, updated_at = $2
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(estimate)
        .bind(local_now())
        .bind(id)
        .fetch_optional(self.pool())
        .await?
        .ok_or_else(|| CoreError::task_not_found(id))?;

        tracing::debug!(id, estimate, "estimate updated");
        Ok(task)
    }

    async fn set_done(&self, id: i64) -> Result<Task, CoreError> {
        // Marking an already finished task again leaves its timestamp alone.
        let task: Task = sqlx::query_as(
            r#"UPDATE tasks
            SET updated_at = CASE WHEN done = 1 THEN updated_at ELSE $1 END, done = 1
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(local_now())
        .bind(id)
        .fetch_optional(self.pool())
        .await?
        .ok_or_else(|| CoreError::task_not_found(id))?;

        tracing::debug!(id, "task marked done");
        Ok(task)
    }

    async fn delete_task(&self, id: i64) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::task_not_found(id));
        }
        tracing::debug!(id, "task deleted");
        Ok(())
    }
}
