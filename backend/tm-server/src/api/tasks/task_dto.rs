use tm_core::Task;

use serde::Serialize;

/// Task DTO for JSON serialization. Timestamps are unix seconds.
#[derive(Debug, Serialize)]
pub struct TaskDto {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub done: bool,
    pub owner_id: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Task> for TaskDto {
    fn from(t: Task) -> Self {
        Self {
            id: t.id,
            title: t.title,
            description: t.description,
            done: t.done,
            owner_id: t.owner_id,
            created_at: t.created_at.timestamp(),
            updated_at: t.updated_at.timestamp(),
        }
    }
}
