// ==========================================
// Customer Analytics - domain type definitions
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// Region - closed sales-region enumeration
// ==========================================
// Unrecognized source values map to Unknown at canonicalization time;
// the raw value is never carried through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    North,
    South,
    East,
    West,
    Central,
    Unknown,
}

impl Region {
    /// Canonical name as persisted in the store and emitted in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::North => "North",
            Region::South => "South",
            Region::East => "East",
            Region::West => "West",
            Region::Central => "Central",
            Region::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Region {
    type Err = UnknownRegion;

    /// Parses a canonical region name (as written by `as_str`).
    /// Synonym folding for raw source values lives in the cleaning rules,
    /// not here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "North" => Ok(Region::North),
            "South" => Ok(Region::South),
            "East" => Ok(Region::East),
            "West" => Ok(Region::West),
            "Central" => Ok(Region::Central),
            "Unknown" => Ok(Region::Unknown),
            other => Err(UnknownRegion(other.to_string())),
        }
    }
}

/// Error for a region name that is not one of the canonical spellings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRegion(pub String);

impl fmt::Display for UnknownRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a canonical region name: {}", self.0)
    }
}

impl std::error::Error for UnknownRegion {}
