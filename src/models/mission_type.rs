use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissionType {
    #[serde(rename = "F")]
    Flight,
    #[serde(rename = "G")]
    Ground,
    #[serde(rename = "S")]
    Simulator,
}

impl MissionType {
    pub const ALL: [MissionType; 3] = [
        MissionType::Flight,
        MissionType::Ground,
        MissionType::Simulator,
    ];

    /// Single-letter code used in mission codes and storage.
    pub fn code(&self) -> &'static str {
        match self {
            MissionType::Flight => "F",
            MissionType::Ground => "G",
            MissionType::Simulator => "S",
        }
    }

    pub fn letter(&self) -> char {
        match self {
            MissionType::Flight => 'F',
            MissionType::Ground => 'G',
            MissionType::Simulator => 'S',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MissionType::Flight => "Flight",
            MissionType::Ground => "Ground",
            MissionType::Simulator => "Simulator",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MissionType::Flight => "Full flight training with aircraft",
            MissionType::Ground => "Ground instruction only",
            MissionType::Simulator => "Simulator training session",
        }
    }

    pub fn requires_aircraft(&self) -> bool {
        matches!(self, MissionType::Flight)
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        self.code()
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "F" => Some(MissionType::Flight),
            "G" => Some(MissionType::Ground),
            "S" => Some(MissionType::Simulator),
            _ => None,
        }
    }

    /// Helper: accept `F`/`f` as well as `flight`, `ground`, `sim`...
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "f" | "flight" => Some(MissionType::Flight),
            "g" | "ground" => Some(MissionType::Ground),
            "s" | "sim" | "simulator" => Some(MissionType::Simulator),
            _ => None,
        }
    }
}

impl FromStr for MissionType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MissionType::from_code(s).ok_or_else(|| AppError::InvalidMissionType(s.to_string()))
    }
}

impl fmt::Display for MissionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
