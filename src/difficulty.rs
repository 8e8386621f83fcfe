use enum_map::Enum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// How fast the game starts and how quickly it speeds up.  Chosen before a
/// game starts; cannot be changed mid-game.
#[derive(Clone, Copy, Debug, Default, Deserialize, Enum, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// The longest name, for laying out menus
    pub(crate) const DISPLAY_WIDTH: u16 = 6;

    /// Time between snake movements at the start of a game
    pub(crate) fn initial_interval(self) -> Duration {
        match self {
            Difficulty::Easy => Duration::from_millis(500),
            Difficulty::Medium => Duration::from_millis(300),
            Difficulty::Hard => Duration::from_millis(150),
        }
    }

    /// How much the interval shrinks each time food is eaten
    pub(crate) fn speed_step(self) -> Duration {
        match self {
            Difficulty::Easy => Duration::ZERO,
            Difficulty::Medium => Duration::from_millis(5),
            Difficulty::Hard => Duration::from_millis(10),
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Difficulty, ParseDifficultyError> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid difficulty {0:?}; expected \"easy\", \"medium\", or \"hard\"")]
pub(crate) struct ParseDifficultyError(String);
