use axum::Json;
use axum::extract::{Path, Query, State};
use tm_db::TaskRepository;

use crate::api::delete_response::DeleteResponse;
use crate::api::error::{ApiError, Result};
use crate::api::extractors::current_user::CurrentUser;
use crate::state::ServerState;

use super::create_task_request::CreateTaskRequest;
use super::list_tasks_query::ListTasksQuery;
use super::task_list_response::TaskListResponse;
use super::task_response::TaskResponse;
use super::update_task_request::UpdateTaskRequest;

/// POST /api/v1/tasks
pub async fn create_task(
    State(state): State<ServerState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<Json<TaskResponse>> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::validation_field("Title must not be empty", "title"));
    }

    let repository = TaskRepository::new(state.pool.clone());
    let task = repository
        .create(user.id, &payload.title, payload.description.as_deref())
        .await?;

    state.publisher.task_created(&task).await;

    Ok(Json(TaskResponse { task: task.into() }))
}

/// GET /api/v1/tasks
pub async fn list_tasks(
    State(state): State<ServerState>,
    CurrentUser(_user): CurrentUser,
    Query(query): Query<ListTasksQuery>,
) -> Result<Json<TaskListResponse>> {
    let repository = TaskRepository::new(state.pool.clone());
    let tasks = repository.find_all(query.skip, query.limit).await?;

    Ok(Json(TaskListResponse {
        tasks: tasks.into_iter().map(Into::into).collect(),
    }))
}

/// GET /api/v1/tasks/{id}
pub async fn get_task(
    State(state): State<ServerState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<TaskResponse>> {
    let repository = TaskRepository::new(state.pool.clone());
    let task = repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Task {id} not found")))?;

    Ok(Json(TaskResponse { task: task.into() }))
}

/// PUT /api/v1/tasks/{id}
///
/// Applies the provided fields, persists, then reloads the row so the
/// response carries the bumped updated_at.
pub async fn update_task(
    State(state): State<ServerState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateTaskRequest>,
) -> Result<Json<TaskResponse>> {
    let repository = TaskRepository::new(state.pool.clone());
    let mut task = repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Task {id} not found")))?;

    if let Some(title) = payload.title {
        if title.trim().is_empty() {
            return Err(ApiError::validation_field("Title must not be empty", "title"));
        }
        task.title = title;
    }
    if let Some(description) = payload.description {
        task.description = Some(description);
    }
    if let Some(done) = payload.done {
        task.done = done;
    }

    repository.update(&task).await?;

    let task = repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Task {id} not found")))?;

    state.publisher.task_updated(id).await;

    Ok(Json(TaskResponse { task: task.into() }))
}

/// DELETE /api/v1/tasks/{id}
pub async fn delete_task(
    State(state): State<ServerState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>> {
    let repository = TaskRepository::new(state.pool.clone());
    let deleted = repository.delete(id).await?;
    if !deleted {
        return Err(ApiError::not_found(format!("Task {id} not found")));
    }

    state.publisher.task_deleted(id).await;

    Ok(Json(DeleteResponse { deleted: true }))
}
