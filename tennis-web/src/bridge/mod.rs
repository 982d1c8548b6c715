//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod assistant;
mod landmarks;
mod session;
mod voice;

pub use landmarks::{Joint, Landmark, LandmarkSet, MAX_COORDINATE, POSE_LANDMARK_COUNT};

pub use session::{
    // WASM entry points
    configure,
    current_config_json,
    start_tracking,
    stop_tracking,
    is_tracking,
    set_auto_coaching,
    process_landmarks,
    last_metrics_json,
    session_stats_json,
};

pub use voice::{listen, speak, stop_listening, BrowserVoice};

pub use assistant::{
    announce_image_analysis, chat_system_instruction, image_analysis_prompt, live_summary,
    live_summary_prompt, shot_label,
};
