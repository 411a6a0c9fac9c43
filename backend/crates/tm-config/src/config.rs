use crate::{
    AuthConfig, ConfigError, ConfigErrorResult, DatabaseConfig, LoggingConfig, ServerConfig,
    WebSocketConfig,
};

use std::path::PathBuf;

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
    pub websocket: WebSocketConfig,
}

impl Config {
    /// Load config with full production error handling.
    ///
    /// Loading order:
    /// 1. Check for TM_CONFIG_DIR env var, else use ./.tm/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply TM_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        // Auto-create config directory
        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join("config.toml");

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &PathBuf) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.clone(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: TM_CONFIG_DIR env var > ./.tm/ (relative to cwd)
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        if let Ok(dir) = std::env::var("TM_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(".tm"))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.auth.validate()?;
        self.websocket.validate()?;

        // Validate database path doesn't escape config dir
        let db_path = std::path::Path::new(&self.database.path);
        if db_path.is_absolute() || self.database.path.contains("..") {
            return Err(ConfigError::database(
                "database.path must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }

    /// Get absolute path to database file.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        let config_dir = Self::config_dir()?;
        Ok(config_dir.join(&self.database.path))
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {}:{} (max {} connections)",
            self.server.host, self.server.port, self.server.max_connections
        );
        info!("  database: {}", self.database.path);

        info!(
            "  auth: {} (lifetime={}s, min_cost={})",
            self.auth.algorithm, self.auth.token_lifetime_secs, self.auth.min_hash_cost
        );

        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );

        info!(
            "  websocket: buffer={}, write_timeout={}ms",
            self.websocket.send_buffer_size, self.websocket.write_timeout_ms
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("TM_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("TM_SERVER_PORT", &mut self.server.port);
        Self::apply_env_parse(
            "TM_SERVER_MAX_CONNECTIONS",
            &mut self.server.max_connections,
        );

        // Database
        Self::apply_env_string("TM_DATABASE_PATH", &mut self.database.path);

        // Auth
        Self::apply_env_option_string("TM_AUTH_SECRET", &mut self.auth.secret);
        Self::apply_env_string("TM_AUTH_ALGORITHM", &mut self.auth.algorithm);
        Self::apply_env_parse(
            "TM_AUTH_TOKEN_LIFETIME_SECS",
            &mut self.auth.token_lifetime_secs,
        );
        Self::apply_env_parse("TM_AUTH_MIN_HASH_COST", &mut self.auth.min_hash_cost);

        // Logging
        Self::apply_env_parse("TM_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("TM_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("TM_LOG_FILE", &mut self.logging.file);

        // WebSocket
        Self::apply_env_parse(
            "TM_WS_SEND_BUFFER_SIZE",
            &mut self.websocket.send_buffer_size,
        );
        Self::apply_env_parse("TM_WS_WRITE_TIMEOUT_MS", &mut self.websocket.write_timeout_ms);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
