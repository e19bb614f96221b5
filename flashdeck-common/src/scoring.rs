//! Scoring policy
//!
//! A difficulty rating moves a card's point counter, and the counter sorts
//! the card into one of two buckets:
//!
//! | rating  | effect on points |
//! |---------|------------------|
//! | `wrong` | reset to 0       |
//! | `hard`  | +1               |
//! | `easy`  | +2               |
//!
//! Cards below [`MASTERY_THRESHOLD`] are due for practice; cards at or
//! above it are mastered.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Points at which a card leaves the practice bucket
pub const MASTERY_THRESHOLD: i64 = 5;

/// How well the user recalled a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Wrong,
    Hard,
    Easy,
}

impl Difficulty {
    /// Points added by this rating, or `None` when the rating resets the counter
    pub fn increment(self) -> Option<i64> {
        match self {
            Difficulty::Wrong => None,
            Difficulty::Hard => Some(1),
            Difficulty::Easy => Some(2),
        }
    }

    /// Apply this rating to a point counter
    pub fn apply(self, points: i64) -> i64 {
        match self.increment() {
            None => 0,
            Some(delta) => points.max(0).saturating_add(delta),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Wrong => "wrong",
            Difficulty::Hard => "hard",
            Difficulty::Easy => "easy",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wrong" => Ok(Difficulty::Wrong),
            "hard" => Ok(Difficulty::Hard),
            "easy" => Ok(Difficulty::Easy),
            other => Err(Error::InvalidInput(format!(
                "Unknown difficulty level: {} (expected wrong, hard or easy)",
                other
            ))),
        }
    }
}

/// Study bucket derived from a card's points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Practice,
    Mastered,
}

impl Bucket {
    pub fn for_points(points: i64) -> Self {
        if points >= MASTERY_THRESHOLD {
            Bucket::Mastered
        } else {
            Bucket::Practice
        }
    }
}
