//! High score stores.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Somewhere the best score is kept between sessions.
pub trait HighScoreStore {
    /// Read the stored best score. A store with nothing saved yields 0.
    fn load(&self) -> Result<u32, StoreError>;

    /// Persist a new best score.
    fn save(&mut self, score: u32) -> Result<(), StoreError>;
}

/// On-disk format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
struct HighScoreFile {
    high_score: u32,
}

/// Best score in a small JSON file: `{ "high_score": N }`.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> Result<u32, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };
        let file: HighScoreFile = serde_json::from_str(&json)?;
        Ok(file.high_score)
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&HighScoreFile { high_score: score })?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// In-memory store for tests and throwaway sessions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    pub score: u32,
}

impl MemoryStore {
    pub fn with_score(score: u32) -> Self {
        Self { score }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<u32, StoreError> {
        Ok(self.score)
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        self.score = score;
        Ok(())
    }
}

/// Cached best score backed by a store.
#[derive(Clone, Debug)]
pub struct HighScore<S> {
    store: S,
    best: u32,
}

impl<S: HighScoreStore> HighScore<S> {
    /// Load the best score. An unreadable store starts from 0.
    pub fn open(store: S) -> Self {
        let best = store.load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "could not read high score, starting from 0");
            0
        });
        Self { store, best }
    }

    /// Current best score.
    #[must_use]
    pub fn best(&self) -> u32 {
        self.best
    }

    /// Re-read the store, keeping the cached value if that fails.
    pub fn reload(&mut self) {
        match self.store.load() {
            Ok(best) => self.best = best,
            Err(err) => tracing::warn!(error = %err, "could not reload high score"),
        }
    }

    /// Record `score` if it beats the best. Returns whether it did.
    ///
    /// The cached best is updated even if persisting fails.
    pub fn check_and_update(&mut self, score: u32) -> Result<bool, StoreError> {
        if score <= self.best {
            return Ok(false);
        }
        self.best = score;
        self.store.save(score)?;
        tracing::info!(high_score = score, "new high score");
        Ok(true)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
