//! Shot type labels

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::Language;

/// Shot type wire names (order matches `ShotType::ALL`)
pub const SHOT_TYPES: [&str; 5] = ["forehand", "backhand", "serve", "volley", "ready_position"];

/// Tennis stroke category for a frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShotType {
    Forehand,
    Backhand,
    Serve,
    Volley,
    ReadyPosition,
}

impl ShotType {
    pub const ALL: [ShotType; 5] = [
        ShotType::Forehand,
        ShotType::Backhand,
        ShotType::Serve,
        ShotType::Volley,
        ShotType::ReadyPosition,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShotType::Forehand => "forehand",
            ShotType::Backhand => "backhand",
            ShotType::Serve => "serve",
            ShotType::Volley => "volley",
            ShotType::ReadyPosition => "ready_position",
        }
    }

    /// Display name for the UI and spoken announcements
    pub fn label(&self, language: Language) -> &'static str {
        match (language, self) {
            (Language::English, ShotType::Forehand) => "Forehand",
            (Language::English, ShotType::Backhand) => "Backhand",
            (Language::English, ShotType::Serve) => "Serve",
            (Language::English, ShotType::Volley) => "Volley",
            (Language::English, ShotType::ReadyPosition) => "Ready position",
            (Language::Arabic, ShotType::Forehand) => "ضربة أمامية",
            (Language::Arabic, ShotType::Backhand) => "ضربة خلفية",
            (Language::Arabic, ShotType::Serve) => "إرسال محترف",
            (Language::Arabic, ShotType::Volley) => "ضربة طائرة",
            (Language::Arabic, ShotType::ReadyPosition) => "وضعية الاستعداد",
        }
    }
}

impl fmt::Display for ShotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a name outside the five known shot types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownShotType(pub String);

impl fmt::Display for UnknownShotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown shot type '{}'", self.0)
    }
}

impl std::error::Error for UnknownShotType {}

impl FromStr for ShotType {
    type Err = UnknownShotType;

    /// Case-insensitive; accepts the wire names plus "ready" as shorthand
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forehand" => Ok(ShotType::Forehand),
            "backhand" => Ok(ShotType::Backhand),
            "serve" => Ok(ShotType::Serve),
            "volley" => Ok(ShotType::Volley),
            "ready_position" | "ready" => Ok(ShotType::ReadyPosition),
            _ => Err(UnknownShotType(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_match_table() {
        for (shot, name) in ShotType::ALL.iter().zip(SHOT_TYPES) {
            assert_eq!(shot.as_str(), name);
            assert_eq!(name.parse::<ShotType>().unwrap(), *shot);
        }
    }

    #[test]
    fn test_parse_is_lenient_about_case() {
        assert_eq!("  Serve ".parse::<ShotType>().unwrap(), ShotType::Serve);
        assert_eq!("READY".parse::<ShotType>().unwrap(), ShotType::ReadyPosition);
        assert!("lob".parse::<ShotType>().is_err());
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&ShotType::ReadyPosition).unwrap();
        assert_eq!(json, "\"ready_position\"");
    }
}
