//! Engine configuration
//!
//! Every field has a default matching the reference tuning, so a JSON
//! payload only needs to name what it overrides.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Which arm holds the racket
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Handedness {
    #[default]
    Right,
    Left,
}

/// Language for spoken cues, labels and summaries
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    English,
    Arabic,
}

impl Language {
    /// BCP-47 tag handed to the speech APIs
    pub fn speech_tag(&self) -> &'static str {
        match self {
            Language::English => "en-US",
            Language::Arabic => "ar-SA",
        }
    }
}

/// Technique scorer tuning
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Accuracy strictly above this is `Correct`
    pub posture_threshold: u8,
    /// Accuracy points per joint (elbow, back, knee)
    pub elbow_weight: f32,
    pub back_weight: f32,
    pub knee_weight: f32,
    /// Degrees past the back/knee bound at which the share reaches zero
    pub back_falloff_deg: f32,
    pub knee_falloff_deg: f32,
    /// Stability penalty per unit of shoulder imbalance
    pub balance_penalty: f32,
    /// Stability penalty per degree of back lean
    pub lean_penalty: f32,
}

/// Reject `value` unless it is finite and `ok` holds
fn check(
    field: &'static str,
    value: f64,
    ok: bool,
    requirement: &'static str,
) -> Result<(), EngineError> {
    if value.is_finite() && ok {
        Ok(())
    } else {
        Err(EngineError::Setting { field, requirement })
    }
}

impl ScoringConfig {
    /// Weights and penalties must be non-negative, falloffs positive
    pub fn validate(&self) -> Result<(), EngineError> {
        let non_negative = [
            ("scoring.elbow_weight", self.elbow_weight),
            ("scoring.back_weight", self.back_weight),
            ("scoring.knee_weight", self.knee_weight),
            ("scoring.balance_penalty", self.balance_penalty),
            ("scoring.lean_penalty", self.lean_penalty),
        ];
        for (field, value) in non_negative {
            check(field, value.into(), value >= 0.0, "must be >= 0")?;
        }
        for (field, value) in [
            ("scoring.back_falloff_deg", self.back_falloff_deg),
            ("scoring.knee_falloff_deg", self.knee_falloff_deg),
        ] {
            check(field, value.into(), value > 0.0, "must be > 0")?;
        }
        Ok(())
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            posture_threshold: 80,
            elbow_weight: 33.0,
            back_weight: 33.0,
            knee_weight: 34.0,
            back_falloff_deg: 45.0,
            knee_falloff_deg: 60.0,
            balance_penalty: 4.0,
            lean_penalty: 0.5,
        }
    }
}

/// Auto-coaching cadence
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoachingConfig {
    /// Praise fires when accuracy reaches this...
    pub praise_threshold: u8,
    /// ...coming from a previous tick below this
    pub praise_from_below: u8,
    pub praise_cooldown_ms: f64,
    /// Accuracy below this (with mistakes) counts as an error tick
    pub error_threshold: u8,
    /// How long an error streak must be unbroken before it is spoken
    pub streak_ms: f64,
    pub error_cooldown_ms: f64,
}

impl CoachingConfig {
    /// Durations must be non-negative
    pub fn validate(&self) -> Result<(), EngineError> {
        for (field, value) in [
            ("coaching.praise_cooldown_ms", self.praise_cooldown_ms),
            ("coaching.streak_ms", self.streak_ms),
            ("coaching.error_cooldown_ms", self.error_cooldown_ms),
        ] {
            check(field, value, value >= 0.0, "must be >= 0")?;
        }
        Ok(())
    }
}

impl Default for CoachingConfig {
    fn default() -> Self {
        Self {
            praise_threshold: 85,
            praise_from_below: 65,
            praise_cooldown_ms: 8000.0,
            error_threshold: 75,
            streak_ms: 2000.0,
            error_cooldown_ms: 5000.0,
        }
    }
}

/// Speech synthesis parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    pub rate: f32,
    pub pitch: f32,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            rate: 1.1,
            pitch: 1.0,
        }
    }
}

/// Top-level engine configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub handedness: Handedness,
    pub language: Language,
    pub scoring: ScoringConfig,
    pub coaching: CoachingConfig,
    pub voice: VoiceConfig,
}

impl EngineConfig {
    /// Parse a (possibly partial) JSON configuration
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: Self = serde_json::from_str(json).map_err(EngineError::Config)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        self.scoring.validate()?;
        self.coaching.validate()?;
        check(
            "voice.rate",
            self.voice.rate.into(),
            self.voice.rate > 0.0,
            "must be > 0",
        )
    }

    pub fn to_json(&self) -> Result<String, EngineError> {
        serde_json::to_string(self).map_err(EngineError::Config)
    }
}
