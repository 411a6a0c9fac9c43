use crate::{DbError, Result as DbErrorResult};

use tm_core::Task;

use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

pub struct TaskRepository {
    pool: SqlitePool,
}

impl TaskRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        owner_id: i64,
        title: &str,
        description: Option<&str>,
    ) -> DbErrorResult<Task> {
        let now = Utc::now();
        let now_ts = now.timestamp();

        let result = sqlx::query(
            r#"
                INSERT INTO tasks (title, description, done, owner_id, created_at, updated_at)
                VALUES (?, ?, 0, ?, ?, ?)
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(owner_id)
        .bind(now_ts)
        .bind(now_ts)
        .execute(&self.pool)
        .await?;

        Ok(Task {
            id: result.last_insert_rowid(),
            title: title.to_string(),
            description: description.map(|d| d.to_string()),
            done: false,
            owner_id,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn find_by_id(&self, id: i64) -> DbErrorResult<Option<Task>> {
        let row = sqlx::query(
            r#"
                SELECT id, title, description, done, owner_id, created_at, updated_at
                FROM tasks
                WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| map_task_row(&r)).transpose()
    }

    pub async fn find_all(&self, skip: i64, limit: i64) -> DbErrorResult<Vec<Task>> {
        let rows = sqlx::query(
            r#"
                SELECT id, title, description, done, owner_id, created_at, updated_at
                FROM tasks
                ORDER BY id
                LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_task_row).collect()
    }

    /// Write back title, description and done flag, bumping `updated_at`
    pub async fn update(&self, task: &Task) -> DbErrorResult<()> {
        let updated_at = Utc::now().timestamp();

        sqlx::query(
            r#"
                UPDATE tasks
                SET title = ?, description = ?, done = ?, updated_at = ?
                WHERE id = ?
            "#,
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.done)
        .bind(updated_at)
        .bind(task.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete a task, returning whether a row was removed
    pub async fn delete(&self, id: i64) -> DbErrorResult<bool> {
        let result = sqlx::query(
            r#"
                DELETE FROM tasks
                WHERE id = ?
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_task_row(row: &SqliteRow) -> DbErrorResult<Task> {
    let created_at: i64 = row.try_get("created_at")?;
    let updated_at: i64 = row.try_get("updated_at")?;

    Ok(Task {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        done: row.try_get("done")?,
        owner_id: row.try_get("owner_id")?,
        created_at: DateTime::from_timestamp(created_at, 0).ok_or_else(|| DbError::Decode {
            message: "Invalid timestamp in tasks.created_at".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?,
        updated_at: DateTime::from_timestamp(updated_at, 0).ok_or_else(|| DbError::Decode {
            message: "Invalid timestamp in tasks.updated_at".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?,
    })
}
