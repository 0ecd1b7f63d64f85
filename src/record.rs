use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::error::Result;

/// Best (highest) seconds left at the end of a completed chain
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BestTime {
    pub seconds_left: u32,
    pub achieved_at: DateTime<Local>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    NewBest,
    NotImproved,
}

/// Durable storage for the single best-time value
pub trait RecordStore {
    /// Absent or unreadable records read as `None`.
    fn load(&self) -> Option<BestTime>;
    fn save(&mut self, best: &BestTime) -> Result<()>;
}

/// Stores `seconds_left` when there is no record yet or it beats the current one strictly.
pub fn submit_time<S>(store: &mut S, seconds_left: u32) -> Result<RecordOutcome>
where
    S: RecordStore + ?Sized,
{
    let improved = match store.load() {
        None => true,
        Some(prev) => seconds_left > prev.seconds_left,
    };
    if !improved {
        return Ok(RecordOutcome::NotImproved);
    }
    store.save(&BestTime {
        seconds_left,
        achieved_at: Local::now(),
    })?;
    Ok(RecordOutcome::NewBest)
}

pub fn best_time_label(best: Option<&BestTime>) -> String {
    match best {
        Some(b) => format!("Best Time: {}s left", b.seconds_left),
        None => "Best Time: No Record yet".to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct FileRecordStore {
    path: PathBuf,
}

impl FileRecordStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::record_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for FileRecordStore {
    fn load(&self) -> Option<BestTime> {
        let bytes = fs::read(&self.path).ok()?;
        match serde_json::from_slice::<BestTime>(&bytes) {
            Ok(best) => Some(best),
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    %err,
                    "unreadable best time, treating as no record"
                );
                None
            }
        }
    }

    fn save(&mut self, best: &BestTime) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(best)?)?;
        Ok(())
    }
}
