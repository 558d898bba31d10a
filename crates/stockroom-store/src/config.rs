//! # Application Configuration
//!
//! Configuration loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`STOCKROOM_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex is
//! needed. If hot-reloading is added later, wrap in `RwLock`.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;

/// Application configuration.
///
/// Most fields have sensible defaults for development.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Organization name (displayed in the shell header and report
    /// footers).
    pub org_name: String,

    /// Override for the session file location. `None` resolves the
    /// platform app-data directory at bootstrap.
    pub session_path: Option<PathBuf>,

    /// Simulated network latency applied to login attempts.
    pub login_delay: Duration,

    /// Whether bootstrap seeds the sample catalog. Disabled by tests
    /// that want an empty registry.
    pub seed_sample_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            org_name: "Stockroom".to_string(),
            session_path: None,
            login_delay: Duration::from_millis(1000),
            seed_sample_data: true,
        }
    }
}

impl AppConfig {
    /// Creates a configuration from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `STOCKROOM_ORG_NAME`: Override organization name
    /// - `STOCKROOM_SESSION_PATH`: Override session file path
    /// - `STOCKROOM_LOGIN_DELAY_MS`: Override login latency in ms
    pub fn from_env() -> Self {
        let mut config = AppConfig::default();

        if let Ok(org_name) = std::env::var("STOCKROOM_ORG_NAME") {
            config.org_name = org_name;
        }

        if let Ok(path) = std::env::var("STOCKROOM_SESSION_PATH") {
            config.session_path = Some(PathBuf::from(path));
        }

        if let Ok(delay_str) = std::env::var("STOCKROOM_LOGIN_DELAY_MS") {
            if let Ok(ms) = delay_str.parse::<u64>() {
                config.login_delay = Duration::from_millis(ms);
            }
        }

        config
    }

    /// Resolves the session file path.
    ///
    /// ## Platform-Specific Paths
    /// - **macOS**: `~/Library/Application Support/com.stockroom.console/session.json`
    /// - **Windows**: `%APPDATA%\stockroom\console\session.json`
    /// - **Linux**: `~/.local/share/console/session.json`
    ///
    /// The explicit `session_path` override wins when set.
    pub fn resolve_session_path(&self) -> Result<PathBuf, Box<dyn std::error::Error>> {
        if let Some(path) = &self.session_path {
            return Ok(path.clone());
        }

        let proj_dirs = ProjectDirs::from("com", "stockroom", "console")
            .ok_or("Could not determine app data directory")?;

        let data_dir = proj_dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        Ok(data_dir.join("session.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.org_name, "Stockroom");
        assert_eq!(config.login_delay, Duration::from_millis(1000));
        assert!(config.seed_sample_data);
        assert!(config.session_path.is_none());
    }

    #[test]
    fn test_explicit_session_path_wins() {
        let config = AppConfig {
            session_path: Some(PathBuf::from("/tmp/s.json")),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_session_path().unwrap(),
            PathBuf::from("/tmp/s.json")
        );
    }
}
