use serde::Serialize;

use super::task_dto::TaskDto;

/// Task collection response
#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    pub tasks: Vec<TaskDto>,
}
