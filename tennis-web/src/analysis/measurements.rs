//! Per-frame joint measurements fed to the scorer

use crate::bridge::{Joint, LandmarkSet};
use crate::config::Handedness;

use super::geometry::{angle_at_vertex, vertical_deviation};

/// Map a right-handed joint name onto the player's racket side
pub fn dominant(joint: Joint, handedness: Handedness) -> Joint {
    match handedness {
        Handedness::Right => joint,
        Handedness::Left => joint.mirrored(),
    }
}

/// Raw (unrounded) measurements for one frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct JointMeasurements {
    /// Shoulder-elbow-wrist angle on the racket arm
    pub elbow_angle: f32,
    /// Shoulder-to-hip deviation from vertical
    pub back_angle: f32,
    /// Hip-knee-ankle angle on the racket side
    pub knee_angle: f32,
    /// Vertical shoulder offset, in hundredths of the frame height
    pub shoulder_balance: f32,
}

impl JointMeasurements {
    pub fn from_landmarks(landmarks: &LandmarkSet, handedness: Handedness) -> Self {
        let side = |joint| landmarks.get(dominant(joint, handedness));

        let elbow_angle = angle_at_vertex(
            side(Joint::RightShoulder),
            side(Joint::RightElbow),
            side(Joint::RightWrist),
        );
        let back_angle = vertical_deviation(side(Joint::RightShoulder), side(Joint::RightHip));
        let knee_angle = angle_at_vertex(
            side(Joint::RightHip),
            side(Joint::RightKnee),
            side(Joint::RightAnkle),
        );

        let shoulder_balance = (landmarks.get(Joint::RightShoulder).y
            - landmarks.get(Joint::LeftShoulder).y)
            .abs()
            * 100.0;

        Self {
            elbow_angle,
            back_angle,
            knee_angle,
            shoulder_balance,
        }
    }
}
