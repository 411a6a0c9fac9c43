use axum::Json;
use axum::extract::{Query, State};
use tm_db::UserRepository;

use crate::api::error::{ApiError, Result};
use crate::api::extractors::current_user::CurrentUser;
use crate::state::ServerState;

use super::list_users_query::ListUsersQuery;
use super::user_list_response::UserListResponse;

/// GET /api/v1/admin/users
///
/// Admin only. Non-admin callers get a 403 without touching the user table.
pub async fn list_users(
    State(state): State<ServerState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<UserListResponse>> {
    if !user.role.can_administer() {
        log::warn!("User {} denied access to admin user listing", user.id);
        return Err(ApiError::forbidden("Insufficient privileges"));
    }

    let repository = UserRepository::new(state.pool.clone());
    let users = repository.find_all(query.skip, query.limit).await?;

    Ok(Json(UserListResponse {
        users: users.into_iter().map(Into::into).collect(),
    }))
}
