use crate::consts;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// The best scores ever recorded, highest first, at most
/// [`TOP_SCORES_LEN`][consts::TOP_SCORES_LEN] of them
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(from = "Vec<u32>", into = "Vec<u32>")]
pub(crate) struct TopScores(Vec<u32>);

impl TopScores {
    pub(crate) fn scores(&self) -> &[u32] {
        &self.0
    }

    /// Add `score` to the table.  Returns the zero-based rank at which it was
    /// placed, or `None` if it did not make the cut.  A score equal to an
    /// existing entry ranks below it.
    pub(crate) fn record(&mut self, score: u32) -> Option<usize> {
        let rank = self.0.iter().take_while(|&&s| s >= score).count();
        if rank >= consts::TOP_SCORES_LEN {
            return None;
        }
        self.0.insert(rank, score);
        self.0.truncate(consts::TOP_SCORES_LEN);
        Some(rank)
    }

    pub(crate) fn load(path: &Path) -> Result<TopScores, LoadError> {
        let src = match fs_err::read(path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(TopScores::default()),
            Err(e) => return Err(LoadError::read(e)),
        };
        serde_json::from_slice(&src).map_err(LoadError::deserialize)
    }

    pub(crate) fn save(&self, path: &Path) -> Result<(), SaveError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string(self).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(path, &src).map_err(SaveError::write)?;
        Ok(())
    }
}

impl From<Vec<u32>> for TopScores {
    fn from(mut scores: Vec<u32>) -> TopScores {
        scores.sort_unstable_by(|a, b| b.cmp(a));
        scores.truncate(consts::TOP_SCORES_LEN);
        TopScores(scores)
    }
}

impl From<TopScores> for Vec<u32> {
    fn from(value: TopScores) -> Vec<u32> {
        value.0
    }
}

/// Where & whether the top scores are persisted
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ScoreFile {
    path: Option<PathBuf>,
    save: bool,
}

impl ScoreFile {
    pub(crate) fn new(path: Option<PathBuf>, save: bool) -> ScoreFile {
        ScoreFile { path, save }
    }

    /// Return the default scores file path
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("powersnake").join("scores.json"))
    }

    /// Read the current table.  Any problem reading it is logged and an empty
    /// table is returned instead.
    pub(crate) fn load(&self) -> TopScores {
        let Some(path) = self.path.as_deref() else {
            return TopScores::default();
        };
        match TopScores::load(path) {
            Ok(scores) => scores,
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %DisplayChain(&e),
                    "Ignoring unusable high scores file"
                );
                TopScores::default()
            }
        }
    }

    /// Read the table, add `score` to it, and write it back.  Returns the
    /// updated table and the rank of `score` within it.  Failure to save is
    /// logged and otherwise ignored.
    pub(crate) fn record(&self, score: u32) -> (TopScores, Option<usize>) {
        let mut scores = self.load();
        let rank = scores.record(score);
        info!(score, ?rank, "Recorded score");
        if self.save {
            if let Some(path) = self.path.as_deref() {
                if let Err(e) = scores.save(path) {
                    warn!(
                        path = %path.display(),
                        error = %DisplayChain(&e),
                        "Could not save high scores"
                    );
                }
            }
        }
        (scores, rank)
    }
}

/// Displays an error followed by each of its sources
#[derive(Debug)]
struct DisplayChain<'a>(&'a dyn std::error::Error);

impl std::fmt::Display for DisplayChain<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)?;
        let mut source = self.0.source();
        while let Some(src) = source {
            write!(f, ": {src}")?;
            source = src.source();
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
#[error("Failed to save high scores to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize high scores")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write high scores to disk")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read high scores from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to read high scores file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize high scores")]
    Deserialize(#[source] serde_json::Error),
}
