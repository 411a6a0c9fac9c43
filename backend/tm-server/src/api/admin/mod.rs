pub mod admin;
pub mod list_users_query;
pub mod user_list_response;
