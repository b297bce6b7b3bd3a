//! Run scoring and best-score persistence

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outcome of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreRecord {
    /// Seconds survived in this run.
    pub run: f64,
    /// Best score after this run was committed.
    pub best: f64,
    /// True if this run set a new best.
    pub new_best: bool,
}

impl ScoreRecord {
    /// Compare a run against the previous best.
    pub fn commit(run: f64, previous_best: f64) -> Self {
        let new_best = run > previous_best;
        Self {
            run,
            best: if new_best { run } else { previous_best },
            new_best,
        }
    }
}

/// Storage for the best-ever score.
pub trait ScoreStore: Send {
    /// Read the stored best score. A store with nothing saved returns 0.0.
    fn load_best(&self) -> anyhow::Result<f64>;

    /// Replace the stored best score.
    fn save_best(&mut self, best: f64) -> anyhow::Result<()>;
}

#[derive(Debug, Serialize, Deserialize)]
struct ScoreFile {
    best_score: f64,
}

/// JSON file store, written atomically.
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_atomic(&self, content: &str) -> anyhow::Result<()> {
        debug!(path = ?self.path, "Writing best score atomically");

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create score directory: {parent:?}"))?;
        }

        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write temp file: {temp_path:?}"))?;
        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Failed to rename temp file to target: {:?}", self.path))?;
        Ok(())
    }
}

impl ScoreStore for FileScoreStore {
    fn load_best(&self) -> anyhow::Result<f64> {
        if !self.path.exists() {
            debug!(path = ?self.path, "No best score file yet");
            return Ok(0.0);
        }
        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read file: {:?}", self.path))?;
        let file: ScoreFile = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse best score file: {:?}", self.path))?;
        if !file.best_score.is_finite() || file.best_score < 0.0 {
            anyhow::bail!("Stored best score is not a valid duration: {}", file.best_score);
        }
        Ok(file.best_score)
    }

    fn save_best(&mut self, best: f64) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(&ScoreFile { best_score: best })
            .context("Failed to serialize best score")?;
        self.write_atomic(&content)
    }
}

/// In-process store.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    best: f64,
    saves: usize,
}

impl MemoryScoreStore {
    pub fn with_best(best: f64) -> Self {
        Self { best, saves: 0 }
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load_best(&self) -> anyhow::Result<f64> {
        Ok(self.best)
    }

    fn save_best(&mut self, best: f64) -> anyhow::Result<()> {
        self.best = best;
        self.saves += 1;
        Ok(())
    }
}
