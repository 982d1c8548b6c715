//! Coaching module - auto-coaching cadence and assistant text
//!
//! Re-exports only. All logic in submodules.

mod cues;
mod state;
mod summary;

pub use cues::CoachingCue;
pub use state::CoachingState;
pub use summary::{
    chat_system_instruction, image_analysis_prompt, local_summary, summary_prompt, ImageAnalysis,
};
