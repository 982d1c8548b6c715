//! Analysis module - joint geometry and technique scoring
//!
//! Re-exports only. All logic in submodules.

mod geometry;
mod knowledge;
mod measurements;
mod scorer;

pub use geometry::{angle_at_vertex, vertical_deviation};
pub use knowledge::{lookup, lookup_name, AngleRange, Fault, IdealMetrics};
pub use measurements::{dominant, JointMeasurements};
pub use scorer::{score_technique, PerformanceAnalysis, PostureStatus};
