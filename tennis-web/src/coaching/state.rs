//! Auto-coaching state machine
//!
//! Turns the per-frame analysis stream into sparse spoken cues. Two
//! triggers exist: a jump from poor to good accuracy (praise), and an
//! error condition that holds unbroken long enough (correction). Both are
//! rate-limited by the time since the last spoken cue.

use crate::analysis::PerformanceAnalysis;
use crate::config::CoachingConfig;

use super::CoachingCue;

/// Coaching memory carried across frames of one tracking session
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoachingState {
    /// When the last cue was spoken (None = never this session)
    pub last_voice_ms: Option<f64>,
    /// When the current error streak began (None = no open streak)
    pub error_streak_start_ms: Option<f64>,
    /// Accuracy seen on the previous tick
    pub last_accuracy: Option<u8>,
    /// Mistake text behind the last correction cue
    pub last_mistake: Option<String>,
}

impl CoachingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything (new session)
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn cooled_down(&self, now_ms: f64, cooldown_ms: f64) -> bool {
        match self.last_voice_ms {
            Some(last) => now_ms - last >= cooldown_ms,
            None => true,
        }
    }

    /// Advance one tick; returns the cue to speak, if any
    ///
    /// The caller owns delivery. The state records the cue as spoken
    /// whether or not the voice capability succeeds.
    pub fn advance(
        &mut self,
        analysis: &PerformanceAnalysis,
        now_ms: f64,
        config: &CoachingConfig,
    ) -> Option<CoachingCue> {
        let accuracy = analysis.accuracy_score;
        // Compare against the previous tick before overwriting it
        let previous = self.last_accuracy.replace(accuracy);

        let improved = accuracy >= config.praise_threshold
            && previous.is_some_and(|p| p < config.praise_from_below);
        if improved && self.cooled_down(now_ms, config.praise_cooldown_ms) {
            self.last_voice_ms = Some(now_ms);
            self.error_streak_start_ms = None;
            log::debug!("improvement {:?} -> {}, praising", previous, accuracy);
            return Some(CoachingCue::Praise);
        }

        let erroring = accuracy < config.error_threshold && analysis.has_mistakes();
        if !erroring {
            if self.error_streak_start_ms.take().is_some() {
                log::trace!("error streak closed at accuracy {}", accuracy);
            }
            return None;
        }

        let Some(started) = self.error_streak_start_ms else {
            self.error_streak_start_ms = Some(now_ms);
            log::trace!("error streak opened at accuracy {}", accuracy);
            return None;
        };

        if now_ms - started < config.streak_ms
            || !self.cooled_down(now_ms, config.error_cooldown_ms)
        {
            return None;
        }

        // has_mistakes() guarantees a first entry
        let mistake = analysis.mistakes.first()?;
        let cue = CoachingCue::for_mistake(mistake);
        self.last_voice_ms = Some(now_ms);
        self.last_mistake = Some(mistake.clone());
        log::debug!(
            "persistent error for {:.0}ms ('{}'), cue {:?}",
            now_ms - started,
            mistake,
            cue
        );
        Some(cue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::PostureStatus;
    use crate::classifier::ShotType;

    fn frame(accuracy: u8, mistakes: &[&str]) -> PerformanceAnalysis {
        PerformanceAnalysis {
            shot_type: ShotType::Forehand,
            posture_status: if accuracy > 80 {
                PostureStatus::Correct
            } else {
                PostureStatus::NeedsAdjustment
            },
            accuracy_score: accuracy,
            stability_score: 90,
            mistakes: mistakes.iter().map(|m| m.to_string()).collect(),
            recommendations: Vec::new(),
            elbow_angle: 150,
            back_angle: 5,
            knee_angle: 140,
        }
    }

    fn run(state: &mut CoachingState, ticks: &[(f64, PerformanceAnalysis)]) -> Vec<CoachingCue> {
        let config = CoachingConfig::default();
        ticks
            .iter()
            .filter_map(|(t, a)| state.advance(a, *t, &config))
            .collect()
    }

    #[test]
    fn test_improvement_praises_once() {
        let mut state = CoachingState::new();
        let t0 = 100_000.0;
        let cues = run(
            &mut state,
            &[
                (t0, frame(60, &[])),
                (t0 + 100.0, frame(60, &[])),
                (t0 + 200.0, frame(90, &[])),
                (t0 + 300.0, frame(90, &[])),
            ],
        );
        assert_eq!(cues, vec![CoachingCue::Praise]);
        assert_eq!(state.last_voice_ms, Some(t0 + 200.0));
    }

    #[test]
    fn test_praise_respects_cooldown() {
        let mut state = CoachingState::new();
        let cues = run(
            &mut state,
            &[
                (0.0, frame(60, &[])),
                (100.0, frame(90, &[])), // praise
                (200.0, frame(60, &[])),
                (300.0, frame(90, &[])), // too soon
                (8_000.0, frame(60, &[])),
                (8_100.0, frame(90, &[])), // 8000ms after the first praise
            ],
        );
        assert_eq!(cues, vec![CoachingCue::Praise, CoachingCue::Praise]);
    }

    #[test]
    fn test_first_frame_cannot_be_an_improvement() {
        // No history means no baseline. Seeding last_accuracy with 0 would
        // instead praise the first good frame of every session.
        let mut state = CoachingState::new();
        let cues = run(&mut state, &[(50_000.0, frame(95, &[]))]);
        assert!(cues.is_empty());
        assert_eq!(state.last_accuracy, Some(95));
    }

    #[test]
    fn test_persistent_error_fires_once() {
        let mut state = CoachingState::new();
        let mistake = ["Elbow over-bent at contact"];
        let cues = run(
            &mut state,
            &[
                (0.0, frame(70, &mistake)),     // streak opens
                (1_000.0, frame(70, &mistake)), // 1000ms
                (2_100.0, frame(70, &mistake)), // cue
                (2_500.0, frame(70, &mistake)), // cooldown
                (4_000.0, frame(70, &mistake)), // cooldown
            ],
        );
        assert_eq!(cues, vec![CoachingCue::AdjustElbow]);
        assert_eq!(state.last_mistake.as_deref(), Some(mistake[0]));
        // Streak is still open after speaking
        assert_eq!(state.error_streak_start_ms, Some(0.0));
    }

    #[test]
    fn test_persistent_error_repeats_after_cooldown() {
        let mut state = CoachingState::new();
        let mistake = ["Torso leaning back too far"];
        let cues = run(
            &mut state,
            &[
                (0.0, frame(60, &mistake)),
                (2_000.0, frame(60, &mistake)),
                (6_999.0, frame(60, &mistake)),
                (7_000.0, frame(60, &mistake)),
            ],
        );
        assert_eq!(
            cues,
            vec![CoachingCue::StraightenBack, CoachingCue::StraightenBack]
        );
    }

    #[test]
    fn test_recovery_resets_streak() {
        let mut state = CoachingState::new();
        let mistake = ["Knees too straight"];
        let cues = run(
            &mut state,
            &[
                (0.0, frame(70, &mistake)),
                (1_500.0, frame(70, &mistake)),
                (1_600.0, frame(80, &[])),
            ],
        );
        assert!(cues.is_empty());
        assert_eq!(state.error_streak_start_ms, None);

        // A new streak has to mature from scratch
        let cues = run(
            &mut state,
            &[
                (1_700.0, frame(70, &mistake)),
                (2_500.0, frame(70, &mistake)),
                (3_699.0, frame(70, &mistake)),
            ],
        );
        assert!(cues.is_empty());
        let cues = run(&mut state, &[(3_700.0, frame(70, &mistake))]);
        assert_eq!(cues, vec![CoachingCue::BendKnees]);
    }

    #[test]
    fn test_low_accuracy_without_mistakes_is_not_an_error() {
        let mut state = CoachingState::new();
        let cues = run(
            &mut state,
            &[(0.0, frame(50, &[])), (3_000.0, frame(50, &[])), (9_000.0, frame(50, &[]))],
        );
        assert!(cues.is_empty());
        assert_eq!(state.error_streak_start_ms, None);
    }

    #[test]
    fn test_praise_closes_open_streak() {
        let mut state = CoachingState::new();
        let mistake = ["Elbow over-bent at contact"];
        let cues = run(
            &mut state,
            &[(0.0, frame(60, &mistake)), (500.0, frame(90, &[]))],
        );
        assert_eq!(cues, vec![CoachingCue::Praise]);
        assert_eq!(state.error_streak_start_ms, None);
    }

    #[test]
    fn test_error_cue_waits_for_voice_cooldown() {
        let mut state = CoachingState::new();
        let mistake = ["Weak swing power"];
        let cues = run(
            &mut state,
            &[
                (0.0, frame(60, &[])),
                (100.0, frame(90, &[])),      // praise at 100
                (200.0, frame(70, &mistake)), // streak opens
                (2_300.0, frame(70, &mistake)), // streak mature, voice cooling
                (5_100.0, frame(70, &mistake)), // 5000ms after praise
            ],
        );
        assert_eq!(cues, vec![CoachingCue::Praise, CoachingCue::MoreForce]);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = CoachingState {
            last_voice_ms: Some(1.0),
            error_streak_start_ms: Some(2.0),
            last_accuracy: Some(50),
            last_mistake: Some("x".into()),
        };
        state.reset();
        assert_eq!(state, CoachingState::default());
    }
}
