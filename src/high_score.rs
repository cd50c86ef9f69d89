//! Persistent best score.
//!
//! The score is stored as a base-10 integer in a small text file, rewritten
//! wholesale on every new best.

use crate::constants::HIGH_SCORE_FILENAME;
use directories::ProjectDirs;
use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Somewhere the best score can be loaded from and saved to.
pub trait ScoreStore {
    /// Previously saved best score, or 0 if there is none or it can't be read.
    fn load(&self) -> u32;

    /// Persist `score` so a later `load` returns it.
    fn save(&self, score: u32) -> io::Result<()>;
}

/// Returns the platform data directory for the game, creating it if needed.
pub fn data_dir() -> io::Result<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", "flappy").ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine data directory",
        )
    })?;

    let dir = project_dirs.data_dir().to_path_buf();
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Parses stored file contents. Surrounding whitespace is tolerated.
pub fn parse_score(content: &str) -> Option<u32> {
    content.trim().parse().ok()
}

/// Best score kept in a text file.
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    /// Store in the default location (`highscore.txt` in the data directory).
    pub fn new() -> io::Result<Self> {
        Ok(Self::with_path(data_dir()?.join(HIGH_SCORE_FILENAME)))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> u32 {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    log::warn!("Could not read {}: {}", self.path.display(), e);
                }
                return 0;
            }
        };

        parse_score(&content).unwrap_or_else(|| {
            log::warn!(
                "Ignoring unparsable high score in {}",
                self.path.display()
            );
            0
        })
    }

    /// Writes to a sibling temp file and renames it over the old one, so an
    /// interrupted write never leaves a truncated score behind.
    fn save(&self, score: u32) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, score.to_string())?;
        fs::rename(&tmp_path, &self.path)?;

        log::debug!("Saved high score {} to {}", score, self.path.display());
        Ok(())
    }
}

/// In-memory store, used by tests and `--no-save`. Records every save.
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    value: RefCell<Option<u32>>,
    saves: RefCell<Vec<u32>>,
    fail_saves: bool,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that already holds `score`.
    pub fn with_value(score: u32) -> Self {
        Self {
            value: RefCell::new(Some(score)),
            ..Self::default()
        }
    }

    /// Store whose saves always fail.
    pub fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    /// Every value passed to a successful `save`, in order.
    pub fn saved(&self) -> Vec<u32> {
        self.saves.borrow().clone()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> u32 {
        self.value.borrow().unwrap_or(0)
    }

    fn save(&self, score: u32) -> io::Result<()> {
        if self.fail_saves {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "save disabled",
            ));
        }
        *self.value.borrow_mut() = Some(score);
        self.saves.borrow_mut().push(score);
        Ok(())
    }
}
