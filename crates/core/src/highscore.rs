//! High score persistence - the only state that outlives a session
//!
//! The stored format is a single decimal integer.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Reads and writes the best score
pub trait HighScoreStore {
    /// Current best score (0 when nothing was stored yet)
    fn load(&self) -> Result<u64>;

    /// Overwrite the stored best score
    fn save(&mut self, score: u64) -> Result<()>;

    /// Store `score` only if it beats the current best. Returns whether it was written.
    fn persist_if_greater(&mut self, score: u64) -> Result<bool> {
        if score > self.load()? {
            self.save(score)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

/// In-process store, lost on exit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryHighScores {
    best: u64,
}

impl MemoryHighScores {
    pub fn new(best: u64) -> Self {
        Self { best }
    }
}

impl HighScoreStore for MemoryHighScores {
    fn load(&self) -> Result<u64> {
        Ok(self.best)
    }

    fn save(&mut self, score: u64) -> Result<()> {
        self.best = score;
        Ok(())
    }
}

/// Store backed by a text file holding one integer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHighScores {
    path: PathBuf,
}

impl FileHighScores {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileHighScores {
    fn load(&self) -> Result<u64> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("read high score from {}", self.path.display()))
            }
        };
        let text = text.trim();
        if text.is_empty() {
            return Ok(0);
        }
        text.parse::<u64>()
            .with_context(|| format!("invalid high score in {}: {:?}", self.path.display(), text))
    }

    fn save(&mut self, score: u64) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("create directory {}", parent.display()))?;
        }
        fs::write(&self.path, format!("{score}\n"))
            .with_context(|| format!("write high score to {}", self.path.display()))
    }
}
