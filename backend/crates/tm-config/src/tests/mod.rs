
use std::env;

use tempfile::TempDir;

/// Restores the previous value of an environment variable on drop.
/// Pair with `serial_test` since the process environment is global.
pub(crate) struct EnvGuard {
    key: &'static str,
    saved: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        let saved = env::var(key).ok();
        unsafe { env::set_var(key, value) };
        Self { key, saved }
    }

    pub(crate) fn remove(key: &'static str) -> Self {
        let saved = env::var(key).ok();
        unsafe { env::remove_var(key) };
        Self { key, saved }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.saved.take() {
            Some(value) => unsafe { env::set_var(self.key, &value) },
            None => unsafe { env::remove_var(self.key) },
        }
    }
}

/// Fresh temp directory wired up as TM_CONFIG_DIR.
pub(crate) fn setup_config_dir() -> (TempDir, EnvGuard) {
    let temp = TempDir::new().unwrap();
    let guard = EnvGuard::set("TM_CONFIG_DIR", temp.path().to_str().unwrap());
    (temp, guard)
}
