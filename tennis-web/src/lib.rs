//! Tennis Web - live tennis technique analysis and auto-coaching
//!
//! Entry point for WASM module. Only contains:
//! - Module declarations
//! - wasm_bindgen start hook
//!
//! The engine (`analysis`, `classifier`, `coaching`, `pipeline`) is pure
//! Rust and has no browser dependency; `bridge` wires it to JS.

pub mod analysis;
pub mod bridge;
pub mod classifier;
pub mod coaching;
pub mod config;
pub mod error;
pub mod pipeline;

use wasm_bindgen::prelude::*;

// Re-export wasm_bindgen functions for JS access
pub use bridge::{process_landmarks, start_tracking, stop_tracking};

pub use analysis::{PerformanceAnalysis, PostureStatus};
pub use classifier::ShotType;
pub use coaching::{CoachingCue, CoachingState};
pub use config::EngineConfig;
pub use error::{EngineError, LandmarkError, VoiceError};
pub use pipeline::{FrameOutcome, FramePipeline, LiveMetrics, MetricsSink, Speaker};

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    // Err only if a logger is already installed
    if console_log::init_with_level(log::Level::Debug).is_ok() {
        log::info!("tennis engine loaded");
    }
}
