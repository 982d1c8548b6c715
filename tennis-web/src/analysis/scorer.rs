//! Technique scoring against the reference table
//!
//! Accuracy is a 100-point budget split across elbow, back and knee (in
//! that order). A joint inside its bound earns its full share; a joint
//! outside earns a share that shrinks with the size of the violation and
//! queues the matching mistake/tip pair.

use serde::Serialize;

use crate::classifier::ShotType;
use crate::config::ScoringConfig;

use super::knowledge::{lookup, Fault, IdealMetrics};
use super::measurements::JointMeasurements;

/// Binary posture verdict
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum PostureStatus {
    Correct,
    #[serde(rename = "Needs Adjustment")]
    NeedsAdjustment,
}

/// Technique assessment for one frame
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceAnalysis {
    pub shot_type: ShotType,
    pub posture_status: PostureStatus,
    /// 0-100
    pub accuracy_score: u8,
    /// 0-100
    pub stability_score: u8,
    /// Distinct, in detection order
    pub mistakes: Vec<String>,
    /// Distinct, in detection order
    pub recommendations: Vec<String>,
    pub elbow_angle: u16,
    pub back_angle: u16,
    pub knee_angle: u16,
}

impl PerformanceAnalysis {
    pub fn has_mistakes(&self) -> bool {
        !self.mistakes.is_empty()
    }
}

/// Collects faults while keeping the lists free of duplicates
#[derive(Default)]
struct Findings {
    mistakes: Vec<String>,
    recommendations: Vec<String>,
}

impl Findings {
    fn record(&mut self, ideal: &IdealMetrics, fault: Fault) {
        push_unique(&mut self.mistakes, ideal.mistake(fault));
        push_unique(&mut self.recommendations, ideal.tip(fault));
    }
}

fn push_unique(list: &mut Vec<String>, item: &str) {
    if !list.iter().any(|existing| existing == item) {
        list.push(item.to_string());
    }
}

/// Share of `weight` earned by a violation, clamped into [0, weight]
fn partial_share(fraction: f32, weight: f32) -> f32 {
    fraction.clamp(0.0, 1.0) * weight
}

/// Score one frame's measurements against the reference for `shot`
pub fn score_technique(
    measurements: &JointMeasurements,
    shot: ShotType,
    config: &ScoringConfig,
) -> PerformanceAnalysis {
    let ideal = lookup(shot);
    let JointMeasurements {
        elbow_angle: elbow,
        back_angle: back,
        knee_angle: knee,
        shoulder_balance,
    } = *measurements;

    let mut findings = Findings::default();
    let mut accuracy = 0.0_f32;

    // Elbow: too bent is the fault
    if elbow < ideal.elbow.min {
        findings.record(ideal, Fault::Elbow);
        accuracy += partial_share(elbow / ideal.elbow.min, config.elbow_weight);
    } else {
        accuracy += config.elbow_weight;
    }

    // Back: leaning past the upper bound
    if back > ideal.back.max {
        findings.record(ideal, Fault::Back);
        let over = (back - ideal.back.max) / config.back_falloff_deg;
        accuracy += partial_share(1.0 - over, config.back_weight);
    } else {
        accuracy += config.back_weight;
    }

    // Knee: legs straighter than the upper bound
    if knee > ideal.knee.max {
        findings.record(ideal, Fault::Knee);
        let over = (knee - ideal.knee.max) / config.knee_falloff_deg;
        accuracy += partial_share(1.0 - over, config.knee_weight);
    } else {
        accuracy += config.knee_weight;
    }

    let accuracy_score = accuracy.round().clamp(0.0, 100.0) as u8;

    let penalty = (shoulder_balance * config.balance_penalty).round()
        + (back * config.lean_penalty).round();
    let stability_score = (100.0 - penalty).clamp(0.0, 100.0) as u8;

    let posture_status = if accuracy_score > config.posture_threshold {
        PostureStatus::Correct
    } else {
        PostureStatus::NeedsAdjustment
    };

    log::trace!(
        "{}: elbow {:.1} back {:.1} knee {:.1} -> accuracy {} stability {}",
        shot,
        elbow,
        back,
        knee,
        accuracy_score,
        stability_score
    );

    PerformanceAnalysis {
        shot_type: shot,
        posture_status,
        accuracy_score,
        stability_score,
        mistakes: findings.mistakes,
        recommendations: findings.recommendations,
        elbow_angle: elbow.round() as u16,
        back_angle: back.round() as u16,
        knee_angle: knee.round() as u16,
    }
}
