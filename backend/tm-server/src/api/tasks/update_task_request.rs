use serde::Deserialize;

/// Partial update. Absent fields keep their current value.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub done: Option<bool>,
}
