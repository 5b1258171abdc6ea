use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GameError;

/// Result of a single Baccarat hand. Ties are not tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Player,
    Banker,
}

impl Outcome {
    pub fn opposite(&self) -> Self {
        match self {
            Outcome::Player => Outcome::Banker,
            Outcome::Banker => Outcome::Player,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Outcome::Player => 'P',
            Outcome::Banker => 'B',
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Player => "P",
            Outcome::Banker => "B",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Player => "Player",
            Outcome::Banker => "Banker",
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'P' => Some(Outcome::Player),
            'B' => Some(Outcome::Banker),
            _ => None,
        }
    }

    /// Parse a compact sequence such as `"PBBP"`. Whitespace and commas are skipped.
    pub fn parse_sequence(s: &str) -> Result<Vec<Self>, GameError> {
        s.chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .map(|c| Self::from_symbol(c).ok_or_else(|| GameError::InvalidOutcome(c.to_string())))
            .collect()
    }
}

impl FromStr for Outcome {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "p" | "player" => Ok(Outcome::Player),
            "b" | "banker" => Ok(Outcome::Banker),
            _ => Err(GameError::InvalidOutcome(s.to_string())),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
