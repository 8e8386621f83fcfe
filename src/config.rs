use crate::difficulty::Difficulty;
use crate::highscores::ScoreFile;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct Config {
    /// Difficulty selected on the main menu at startup
    pub(crate) difficulty: Difficulty,

    /// Whether to ring the terminal bell for sound cues
    pub(crate) sound: bool,

    /// Settings about data files
    pub(crate) files: FileConfig,

    /// Settings about diagnostic logging
    pub(crate) log: LogConfig,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            difficulty: Difficulty::default(),
            sound: true,
            files: FileConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("powersnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Return where top scores should be stored: the file given in the
    /// configuration or, if that is not set, the default scores file path.
    pub(crate) fn score_file(&self) -> ScoreFile {
        let path = self
            .files
            .scores_file
            .clone()
            .or_else(ScoreFile::default_path);
        ScoreFile::new(path, self.files.save_scores)
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "RawFileConfig")]
pub(crate) struct FileConfig {
    /// Path at which top scores should be stored
    scores_file: Option<PathBuf>,

    /// Whether to save top scores after each game
    save_scores: bool,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            scores_file: None,
            save_scores: true,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawFileConfig {
    scores_file: Option<String>,
    save_scores: bool,
}

impl Default for RawFileConfig {
    fn default() -> RawFileConfig {
        RawFileConfig {
            scores_file: None,
            save_scores: true,
        }
    }
}

impl TryFrom<RawFileConfig> for FileConfig {
    type Error = ExpandError;

    fn try_from(value: RawFileConfig) -> Result<FileConfig, ExpandError> {
        Ok(FileConfig {
            scores_file: value.scores_file.as_deref().map(expanduser).transpose()?,
            save_scores: value.save_scores,
        })
    }
}

#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(try_from = "RawLogConfig")]
pub(crate) struct LogConfig {
    /// File to which diagnostic logs are appended
    pub(crate) file: Option<PathBuf>,
}

#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default)]
struct RawLogConfig {
    file: Option<String>,
}

impl TryFrom<RawLogConfig> for LogConfig {
    type Error = ExpandError;

    fn try_from(value: RawLogConfig) -> Result<LogConfig, ExpandError> {
        Ok(LogConfig {
            file: value.file.as_deref().map(expanduser).transpose()?,
        })
    }
}

/// Replace a leading `~` in `path` with the user's home directory
pub(crate) fn expanduser(path: &str) -> Result<PathBuf, ExpandError> {
    let rest = match path.strip_prefix('~') {
        Some("") => "",
        Some(rest) => match rest.strip_prefix(['/', std::path::MAIN_SEPARATOR]) {
            Some(rest) => rest,
            None => return Ok(PathBuf::from(path)),
        },
        None => return Ok(PathBuf::from(path)),
    };
    let home = dirs::home_dir().ok_or(ExpandError)?;
    Ok(if rest.is_empty() { home } else { home.join(rest) })
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("could not determine home directory for expanding \"~\"")]
pub(crate) struct ExpandError;

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
