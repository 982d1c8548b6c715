//! Frame pipeline - per-frame orchestration
//!
//! landmarks → measurements → shot classifier → technique scorer →
//! auto-coach → metrics sink. One tick runs to completion before the next
//! begins; the pipeline exclusively owns the coaching state.

use serde::Serialize;

use crate::analysis::{score_technique, JointMeasurements, PerformanceAnalysis};
use crate::bridge::LandmarkSet;
use crate::classifier::classify_shot;
use crate::coaching::{CoachingCue, CoachingState};
use crate::config::EngineConfig;
use crate::error::{LandmarkError, VoiceError};

// ============================================================================
// INJECTED CAPABILITIES
// ============================================================================

/// Speech output. Implementations interrupt any current utterance.
pub trait Speaker {
    fn speak(&mut self, text: &str) -> Result<(), VoiceError>;
}

/// Consumer of per-frame metrics snapshots (the UI)
pub trait MetricsSink {
    fn publish(&mut self, metrics: &LiveMetrics);
}

// ============================================================================
// OUTPUT TYPES
// ============================================================================

/// Snapshot published to the UI every analyzed frame
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveMetrics {
    #[serde(flatten)]
    pub analysis: PerformanceAnalysis,
    /// Rounded shoulder imbalance
    pub shoulder_balance: u16,
}

/// A cue the auto-coach decided on, and what happened when it was spoken
#[derive(Clone, Debug, PartialEq)]
pub struct SpokenCue {
    pub cue: CoachingCue,
    pub text: &'static str,
    pub delivery: Result<(), VoiceError>,
}

/// Result of one tick
#[derive(Clone, Debug, PartialEq)]
pub enum FrameOutcome {
    /// No usable landmarks; nothing published
    Skipped(LandmarkError),
    Analyzed {
        metrics: LiveMetrics,
        cue: Option<SpokenCue>,
    },
}

impl FrameOutcome {
    pub fn metrics(&self) -> Option<&LiveMetrics> {
        match self {
            FrameOutcome::Analyzed { metrics, .. } => Some(metrics),
            FrameOutcome::Skipped(_) => None,
        }
    }

    pub fn cue(&self) -> Option<&SpokenCue> {
        match self {
            FrameOutcome::Analyzed { cue, .. } => cue.as_ref(),
            FrameOutcome::Skipped(_) => None,
        }
    }
}

/// Session counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStats {
    pub frames_analyzed: u64,
    pub frames_skipped: u64,
    pub cues_spoken: u64,
    pub voice_failures: u64,
}

// ============================================================================
// PIPELINE
// ============================================================================

/// Live analysis engine for one tracking session
pub struct FramePipeline {
    config: EngineConfig,
    coaching: CoachingState,
    auto_coaching: bool,
    stats: PipelineStats,
    last_metrics: Option<LiveMetrics>,
}

impl FramePipeline {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            coaching: CoachingState::new(),
            auto_coaching: false,
            stats: PipelineStats::default(),
            last_metrics: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Swap tuning mid-session; coaching memory is kept
    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
    }

    /// Read on every tick
    pub fn set_auto_coaching(&mut self, enabled: bool) {
        self.auto_coaching = enabled;
    }

    pub fn auto_coaching(&self) -> bool {
        self.auto_coaching
    }

    pub fn coaching_state(&self) -> &CoachingState {
        &self.coaching
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    pub fn last_metrics(&self) -> Option<&LiveMetrics> {
        self.last_metrics.as_ref()
    }

    /// Drop coaching memory, counters and the last snapshot
    pub fn reset(&mut self) {
        self.coaching.reset();
        self.stats = PipelineStats::default();
        self.last_metrics = None;
    }

    /// Classify and score a frame without touching coaching state
    pub fn analyze(&self, landmarks: &LandmarkSet) -> LiveMetrics {
        let measurements = JointMeasurements::from_landmarks(landmarks, self.config.handedness);
        let shot = classify_shot(landmarks, self.config.handedness);
        let analysis = score_technique(&measurements, shot, &self.config.scoring);

        LiveMetrics {
            analysis,
            shoulder_balance: measurements.shoulder_balance.round() as u16,
        }
    }

    /// Run one tick from the flat landmark buffer sent by JS
    pub fn process_frame(
        &mut self,
        data: &[f32],
        now_ms: f64,
        speaker: &mut impl Speaker,
        sink: &mut impl MetricsSink,
    ) -> FrameOutcome {
        match LandmarkSet::from_flat(data) {
            Ok(landmarks) => self.process_landmarks(&landmarks, now_ms, speaker, sink),
            Err(err) => self.skip(err),
        }
    }

    /// Run one tick from an already validated landmark set
    pub fn process_landmarks(
        &mut self,
        landmarks: &LandmarkSet,
        now_ms: f64,
        speaker: &mut impl Speaker,
        sink: &mut impl MetricsSink,
    ) -> FrameOutcome {
        let metrics = self.analyze(landmarks);
        self.stats.frames_analyzed += 1;

        let cue = if self.auto_coaching {
            self.coaching
                .advance(&metrics.analysis, now_ms, &self.config.coaching)
                .map(|cue| self.deliver(cue, speaker))
        } else {
            None
        };

        sink.publish(&metrics);
        self.last_metrics = Some(metrics.clone());

        FrameOutcome::Analyzed { metrics, cue }
    }

    fn skip(&mut self, err: LandmarkError) -> FrameOutcome {
        self.stats.frames_skipped += 1;
        log::debug!("frame skipped: {}", err);
        FrameOutcome::Skipped(err)
    }

    fn deliver(&mut self, cue: CoachingCue, speaker: &mut impl Speaker) -> SpokenCue {
        let text = cue.phrase(self.config.language);
        let delivery = speaker.speak(text);
        match &delivery {
            Ok(()) => {
                self.stats.cues_spoken += 1;
                log::info!("coaching cue: {}", text);
            }
            Err(err) => {
                self.stats.voice_failures += 1;
                log::warn!("coaching cue '{}' not delivered: {}", text, err);
            }
        }
        SpokenCue {
            cue,
            text,
            delivery,
        }
    }
}

impl Default for FramePipeline {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
