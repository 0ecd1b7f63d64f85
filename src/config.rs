use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;

/// Parameters of the one-shot particle burst shown on a completed chain
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CelebrationConfig {
    pub particle_count: usize,
    /// Cone width in degrees, centred on straight up
    pub spread_degrees: f64,
    /// Burst origin as fractions of the screen (0.0..=1.0)
    pub origin_x: f64,
    pub origin_y: f64,
    /// Hex colors, e.g. "#3498db"
    pub colors: Vec<String>,
}

impl Default for CelebrationConfig {
    fn default() -> Self {
        Self {
            particle_count: 150,
            spread_degrees: 70.0,
            origin_x: 0.5,
            origin_y: 0.6,
            colors: vec![
                "#3498db".to_string(),
                "#27ae60".to_string(),
                "#f1c40f".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub round_secs: u32,
    pub penalty_secs: u32,
    pub low_time_secs: u32,
    pub shake_millis: u64,
    pub celebration: CelebrationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            round_secs: 60,
            penalty_secs: 5,
            low_time_secs: 10,
            shake_millis: 500,
            celebration: CelebrationConfig::default(),
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> crate::error::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            return Config::default();
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "ignoring malformed config");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> crate::error::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}
