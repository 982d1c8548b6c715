//! Landmark ingestion and validation
//!
//! Receives MediaPipe Pose landmarks from JavaScript and turns them into a
//! validated `LandmarkSet`. Anything short, empty, non-finite or far outside
//! the frame is rejected here so the analysis code can index joints without
//! checks.

use crate::error::LandmarkError;

// ============================================================================
// LANDMARK INDICES (MediaPipe Pose - 33 total)
// ============================================================================

/// Landmarks per pose frame
pub const POSE_LANDMARK_COUNT: usize = 33;

/// Largest |x| or |y| accepted for a required joint. MediaPipe reports
/// slightly out-of-frame joints outside 0-1, never this far.
pub const MAX_COORDINATE: f32 = 10.0;

/// Body joints the engine reads, by MediaPipe Pose index
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Joint {
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl Joint {
    /// Every joint that must be present and finite
    pub const REQUIRED: [Joint; 12] = [
        Joint::LeftShoulder,
        Joint::RightShoulder,
        Joint::LeftElbow,
        Joint::RightElbow,
        Joint::LeftWrist,
        Joint::RightWrist,
        Joint::LeftHip,
        Joint::RightHip,
        Joint::LeftKnee,
        Joint::RightKnee,
        Joint::LeftAnkle,
        Joint::RightAnkle,
    ];

    pub fn index(&self) -> usize {
        match self {
            Joint::LeftShoulder => 11,
            Joint::RightShoulder => 12,
            Joint::LeftElbow => 13,
            Joint::RightElbow => 14,
            Joint::LeftWrist => 15,
            Joint::RightWrist => 16,
            Joint::LeftHip => 23,
            Joint::RightHip => 24,
            Joint::LeftKnee => 25,
            Joint::RightKnee => 26,
            Joint::LeftAnkle => 27,
            Joint::RightAnkle => 28,
        }
    }

    /// Same joint on the other side of the body
    pub fn mirrored(&self) -> Joint {
        match self {
            Joint::LeftShoulder => Joint::RightShoulder,
            Joint::RightShoulder => Joint::LeftShoulder,
            Joint::LeftElbow => Joint::RightElbow,
            Joint::RightElbow => Joint::LeftElbow,
            Joint::LeftWrist => Joint::RightWrist,
            Joint::RightWrist => Joint::LeftWrist,
            Joint::LeftHip => Joint::RightHip,
            Joint::RightHip => Joint::LeftHip,
            Joint::LeftKnee => Joint::RightKnee,
            Joint::RightKnee => Joint::LeftKnee,
            Joint::LeftAnkle => Joint::RightAnkle,
            Joint::RightAnkle => Joint::LeftAnkle,
        }
    }
}

// ============================================================================
// LANDMARK DATA STRUCTURE
// ============================================================================

/// A single landmark point (normalized coordinates)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Landmark {
    pub x: f32, // 0-1 normalized
    pub y: f32, // 0-1 normalized, grows downward
    pub z: f32, // Relative depth, unused by the 2D math
    pub visibility: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            visibility: 1.0,
        }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    fn in_range(&self) -> bool {
        self.x.abs() <= MAX_COORDINATE && self.y.abs() <= MAX_COORDINATE
    }
}

impl Default for Landmark {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// One frame of pose landmarks with every required joint validated
#[derive(Clone, Debug)]
pub struct LandmarkSet {
    landmarks: Vec<Landmark>,
}

impl LandmarkSet {
    /// Validate an ordered landmark sequence
    pub fn new(landmarks: Vec<Landmark>) -> Result<Self, LandmarkError> {
        if landmarks.is_empty() {
            return Err(LandmarkError::Empty);
        }
        if landmarks.len() < POSE_LANDMARK_COUNT {
            return Err(LandmarkError::TooFewLandmarks {
                expected: POSE_LANDMARK_COUNT,
                actual: landmarks.len(),
            });
        }
        if let Some(joint) = Joint::REQUIRED
            .iter()
            .find(|joint| !landmarks[joint.index()].is_finite())
        {
            return Err(LandmarkError::NonFinite(*joint));
        }
        if let Some(joint) = Joint::REQUIRED
            .iter()
            .find(|joint| !landmarks[joint.index()].in_range())
        {
            return Err(LandmarkError::OutOfRange(*joint));
        }
        Ok(Self { landmarks })
    }

    /// Parse the flat Float32Array sent from JavaScript
    ///
    /// Accepts 33 x (x, y, z) = 99 values or 33 x (x, y, z, visibility) = 132.
    pub fn from_flat(data: &[f32]) -> Result<Self, LandmarkError> {
        let stride = match data.len() {
            0 => return Err(LandmarkError::Empty),
            n if n == POSE_LANDMARK_COUNT * 3 => 3,
            n if n == POSE_LANDMARK_COUNT * 4 => 4,
            n => return Err(LandmarkError::BadFlatLength(n)),
        };

        let landmarks = data
            .chunks_exact(stride)
            .map(|c| Landmark {
                x: c[0],
                y: c[1],
                z: c[2],
                visibility: if stride == 4 { c[3] } else { 1.0 },
            })
            .collect();

        Self::new(landmarks)
    }

    pub fn get(&self, joint: Joint) -> Landmark {
        self.landmarks[joint.index()]
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }
}
