//! User settings, read from `config.json` in the platform config directory.

use crate::constants::{CONFIG_FILENAME, DEFAULT_TICKS_PER_SECOND};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Simulation rate. One update and one draw per tick.
    pub ticks_per_second: u32,
    /// Overrides the default `highscore.txt` location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_score_file: Option<PathBuf>,
    /// Overrides the default `flappy.log` location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            high_score_file: None,
            log_file: None,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> io::Result<Self> {
        serde_json::from_str(json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Reads settings from `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> io::Result<Self> {
        match fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Duration of one tick. A rate of 0 is treated as 1.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.ticks_per_second.max(1) as f64)
    }
}

/// Default location of `config.json`.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "flappy").map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}
