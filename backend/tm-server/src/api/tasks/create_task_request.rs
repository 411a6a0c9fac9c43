use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    /// Task title (required)
    pub title: String,

    /// Longer free-form description (optional)
    #[serde(default)]
    pub description: Option<String>,
}
