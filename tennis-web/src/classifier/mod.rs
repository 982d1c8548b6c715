//! Classifier module - per-frame shot classification
//!
//! Cheap positional heuristics only; runs at camera frame rate.

mod heuristics;
mod shot_type;

pub use heuristics::classify_shot;
pub use shot_type::{ShotType, UnknownShotType, SHOT_TYPES};
