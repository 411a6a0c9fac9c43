use serde::Serialize;

use super::task_dto::TaskDto;

/// Single task response
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub task: TaskDto,
}
