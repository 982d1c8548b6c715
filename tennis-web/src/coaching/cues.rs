//! Spoken coaching cues

use serde::Serialize;

use crate::config::Language;

/// Short fixed phrase the auto-coach can speak
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoachingCue {
    /// Sudden improvement
    Praise,
    AdjustElbow,
    StraightenBack,
    BendKnees,
    MoreForce,
    /// No keyword matched the mistake
    AdjustPosition,
}

/// Keyword rules, lowest priority first: a later match overrides an earlier one
const KEYWORD_RULES: [(&[&str], CoachingCue); 4] = [
    (&["elbow"], CoachingCue::AdjustElbow),
    (&["back", "leaning"], CoachingCue::StraightenBack),
    (&["knee", "legs"], CoachingCue::BendKnees),
    (&["power"], CoachingCue::MoreForce),
];

impl CoachingCue {
    /// Pick the corrective cue for a mistake description
    pub fn for_mistake(mistake: &str) -> CoachingCue {
        let text = mistake.to_lowercase();
        KEYWORD_RULES
            .iter()
            .rev()
            .find(|(keywords, _)| keywords.iter().any(|k| text.contains(k)))
            .map(|(_, cue)| *cue)
            .unwrap_or(CoachingCue::AdjustPosition)
    }

    pub fn phrase(&self, language: Language) -> &'static str {
        match language {
            Language::English => match self {
                CoachingCue::Praise => "Excellent, that's better",
                CoachingCue::AdjustElbow => "Adjust your elbow",
                CoachingCue::StraightenBack => "Straighten your back",
                CoachingCue::BendKnees => "Bend your knees",
                CoachingCue::MoreForce => "Move with more force",
                CoachingCue::AdjustPosition => "Adjust your position",
            },
            Language::Arabic => match self {
                CoachingCue::Praise => "ممتاز، كده أفضل",
                CoachingCue::AdjustElbow => "عدل وضعية الكوع",
                CoachingCue::StraightenBack => "افرد ظهرك",
                CoachingCue::BendKnees => "اثنِ ركبتيك",
                CoachingCue::MoreForce => "تحرك بقوة أكبر",
                CoachingCue::AdjustPosition => "عدل وضعيتك",
            },
        }
    }

    pub fn is_praise(&self) -> bool {
        matches!(self, CoachingCue::Praise)
    }
}
