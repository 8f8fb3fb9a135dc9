//! High-score persistence.

use std::io;
use std::path::PathBuf;

pub trait HighScoreStore {
    fn high_score(&self) -> io::Result<u32>;
    fn set_high_score(&mut self, score: u32) -> io::Result<()>;
}

/// Plain-text file holding a single number.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    /// `$HOME/.extreme_fishes_score`, or the working directory without `HOME`.
    pub fn in_home() -> Self {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        FileStore::new(PathBuf::from(home).join(".extreme_fishes_score"))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl HighScoreStore for FileStore {
    /// A missing file means no score yet; unreadable contents count as zero.
    fn high_score(&self) -> io::Result<u32> {
        match std::fs::read_to_string(&self.path) {
            Ok(s) => Ok(s.trim().parse().unwrap_or(0)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e),
        }
    }

    fn set_high_score(&mut self, score: u32) -> io::Result<()> {
        std::fs::write(&self.path, score.to_string())
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    pub score: u32,
}

impl HighScoreStore for MemoryStore {
    fn high_score(&self) -> io::Result<u32> {
        Ok(self.score)
    }

    fn set_high_score(&mut self, score: u32) -> io::Result<()> {
        self.score = score;
        Ok(())
    }
}
