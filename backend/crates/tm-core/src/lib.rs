pub mod error;
pub mod models;

pub use error::{CoreError, Result};
pub use models::role::Role;
pub use models::task::Task;
pub use models::user::User;

pub use error_location::ErrorLocation;
