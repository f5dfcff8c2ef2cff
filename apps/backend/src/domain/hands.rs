//! Hands, outcomes, and the cyclic rule that decides a round.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

/// One of the three hands a side can throw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hand {
    Rock,
    Paper,
    Scissors,
}

impl Hand {
    pub const ALL: [Hand; 3] = [Hand::Rock, Hand::Paper, Hand::Scissors];

    /// Wire/storage form: `rock`, `paper`, `scissors`.
    pub fn as_str(self) -> &'static str {
        match self {
            Hand::Rock => "rock",
            Hand::Paper => "paper",
            Hand::Scissors => "scissors",
        }
    }

    /// Capitalized form used in result messages.
    pub fn label(self) -> &'static str {
        match self {
            Hand::Rock => "Rock",
            Hand::Paper => "Paper",
            Hand::Scissors => "Scissors",
        }
    }

    /// rock > scissors > paper > rock
    pub fn beats(self, other: Hand) -> bool {
        matches!(
            (self, other),
            (Hand::Rock, Hand::Scissors) | (Hand::Scissors, Hand::Paper) | (Hand::Paper, Hand::Rock)
        )
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Hand {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rock" => Ok(Hand::Rock),
            "paper" => Ok(Hand::Paper),
            "scissors" => Ok(Hand::Scissors),
            _ => Err(DomainError::validation(
                ValidationKind::InvalidHand,
                format!("Invalid choice '{}', must be 'rock', 'paper', or 'scissors'", s.trim()),
            )),
        }
    }
}

/// Result of a round from the acting player's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Lose,
    Tie,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Win => "win",
            Outcome::Lose => "lose",
            Outcome::Tie => "tie",
        }
    }

    pub fn is_win(self) -> bool {
        self == Outcome::Win
    }

    /// The same round seen from the other side.
    pub fn reversed(self) -> Outcome {
        match self {
            Outcome::Win => Outcome::Lose,
            Outcome::Lose => Outcome::Win,
            Outcome::Tie => Outcome::Tie,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decide a round. Total and side-effect free.
pub fn resolve(player: Hand, computer: Hand) -> Outcome {
    if player == computer {
        Outcome::Tie
    } else if player.beats(computer) {
        Outcome::Win
    } else {
        Outcome::Lose
    }
}
