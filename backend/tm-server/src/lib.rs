pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod state;

#[cfg(test)]
mod tests;

pub use api::{
    admin::{admin::list_users, list_users_query::ListUsersQuery, user_list_response::UserListResponse},
    auth::{
        auth::{logout, me, register, token},
        register_request::RegisterRequest,
        token_request::TokenRequest,
        token_response::TokenResponse,
        user_dto::UserDto,
        user_response::UserResponse,
    },
    delete_response::DeleteResponse,
    error::ApiError,
    error::Result as ApiResult,
    extractors::current_user::CurrentUser,
    message_response::MessageResponse,
    tasks::{
        create_task_request::CreateTaskRequest,
        list_tasks_query::ListTasksQuery,
        task_dto::TaskDto,
        task_list_response::TaskListResponse,
        task_response::TaskResponse,
        tasks::{create_task, delete_task, get_task, list_tasks, update_task},
        update_task_request::UpdateTaskRequest,
    },
};

pub use crate::error::ServerError;
pub use crate::routes::build_router;
pub use crate::state::ServerState;
