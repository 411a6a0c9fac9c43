use serde::Serialize;

use crate::api::auth::user_dto::UserDto;

/// User collection response
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserDto>,
}
