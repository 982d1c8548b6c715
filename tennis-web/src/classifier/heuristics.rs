//! Positional shot classification
//!
//! Per-frame rules over the landmark layout, no temporal smoothing. The
//! first matching rule wins, so the order below is the tie-breaker.

use crate::analysis::dominant;
use crate::bridge::{Joint, LandmarkSet};
use crate::config::Handedness;

use super::ShotType;

/// Max horizontal wrist-to-shoulder offset for a volley
const VOLLEY_ALIGN_TOLERANCE: f32 = 0.1;

/// Max knee-to-wrist vertical gap for the ready position
const READY_KNEE_GAP: f32 = 0.2;

/// Classify one frame
///
/// Rules, in priority order (right-handed names; mirrored for left):
/// 1. Both wrists above the dominant shoulder → serve
/// 2. Dominant wrist crossed past the opposite shoulder → backhand
/// 3. Dominant wrist above the hip and under the shoulder → volley
/// 4. Dominant knee close below the wrist → ready position
/// 5. Otherwise → forehand
pub fn classify_shot(landmarks: &LandmarkSet, handedness: Handedness) -> ShotType {
    let shoulder = landmarks.get(dominant(Joint::RightShoulder, handedness));
    let off_shoulder = landmarks.get(dominant(Joint::LeftShoulder, handedness));
    let wrist = landmarks.get(dominant(Joint::RightWrist, handedness));
    let off_wrist = landmarks.get(dominant(Joint::LeftWrist, handedness));
    let hip = landmarks.get(dominant(Joint::RightHip, handedness));
    let knee = landmarks.get(dominant(Joint::RightKnee, handedness));

    if wrist.y < shoulder.y && off_wrist.y < shoulder.y {
        return ShotType::Serve;
    }

    let crossed = match handedness {
        Handedness::Right => wrist.x < off_shoulder.x,
        Handedness::Left => wrist.x > off_shoulder.x,
    };
    if crossed {
        return ShotType::Backhand;
    }

    if wrist.y < hip.y && (wrist.x - shoulder.x).abs() < VOLLEY_ALIGN_TOLERANCE {
        return ShotType::Volley;
    }

    if knee.y - wrist.y < READY_KNEE_GAP {
        return ShotType::ReadyPosition;
    }

    ShotType::Forehand
}
