use crate::DEFAULT_DATABASE_FILENAME;

use serde::Deserialize;

/// SQLite file location. Must stay relative; `Config::validate` rejects
/// absolute paths and `..` components so the file lands under the config dir.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_DATABASE_FILENAME.to_string(),
        }
    }
}
