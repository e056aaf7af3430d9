//! Rank tier calculation
//!
//! A profile's rank is a pure function of its all-time vote count: fixed
//! ascending thresholds, evaluated highest-first, no history or hysteresis.
//! The tier never decreases as the vote count grows.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Discrete rank tier derived from a profile's total vote count.
///
/// Variants are ordered lowest to highest so `Ord` matches tier seniority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
    Master,
    Legend,
}

impl Rank {
    /// Map a total vote count to its rank tier.
    ///
    /// Thresholds: 1000 → legend, 500 → master, 200 → diamond,
    /// 100 → platinum, 50 → gold, 20 → silver, everything below → bronze.
    pub fn for_votes(votes: i64) -> Rank {
        if votes >= 1000 {
            Rank::Legend
        } else if votes >= 500 {
            Rank::Master
        } else if votes >= 200 {
            Rank::Diamond
        } else if votes >= 100 {
            Rank::Platinum
        } else if votes >= 50 {
            Rank::Gold
        } else if votes >= 20 {
            Rank::Silver
        } else {
            Rank::Bronze
        }
    }

    /// Database representation (lowercase tier name).
    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::Bronze => "bronze",
            Rank::Silver => "silver",
            Rank::Gold => "gold",
            Rank::Platinum => "platinum",
            Rank::Diamond => "diamond",
            Rank::Master => "master",
            Rank::Legend => "legend",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rank {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bronze" => Ok(Rank::Bronze),
            "silver" => Ok(Rank::Silver),
            "gold" => Ok(Rank::Gold),
            "platinum" => Ok(Rank::Platinum),
            "diamond" => Ok(Rank::Diamond),
            "master" => Ok(Rank::Master),
            "legend" => Ok(Rank::Legend),
            other => Err(Error::InvalidInput(format!("Unknown rank: {}", other))),
        }
    }
}
