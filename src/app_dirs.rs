use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "wordchain";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Directory for persisted game state (best time, log file)
    pub fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(
                PathBuf::from(home)
                    .join(".local")
                    .join("state")
                    .join(APP_NAME),
            )
        } else {
            ProjectDirs::from("", "", APP_NAME).map(|pd| pd.data_local_dir().to_path_buf())
        }
    }

    pub fn record_path() -> PathBuf {
        Self::state_dir()
            .map(|dir| dir.join("best_time.json"))
            .unwrap_or_else(|| PathBuf::from("wordchain_best_time.json"))
    }

    pub fn log_path() -> PathBuf {
        Self::state_dir()
            .map(|dir| dir.join("wordchain.log"))
            .unwrap_or_else(|| PathBuf::from("wordchain.log"))
    }

    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", APP_NAME)
            .map(|pd| pd.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("wordchain_config.json"))
    }
}
