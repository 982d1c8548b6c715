//! Assistant glue: text the UI sends to or receives from the external model

use wasm_bindgen::prelude::*;

use crate::classifier::ShotType;
use crate::coaching::{self, local_summary, summary_prompt, ImageAnalysis};
use crate::pipeline::Speaker;

use super::session::{current_config, with_last_metrics};
use super::voice::BrowserVoice;

/// Refinement prompt for the latest live metrics
#[wasm_bindgen]
pub fn live_summary_prompt() -> Option<String> {
    with_last_metrics(|metrics, config| summary_prompt(&metrics.analysis, config.language))
}

/// Offline summary of the latest live metrics
#[wasm_bindgen]
pub fn live_summary() -> Option<String> {
    with_last_metrics(|metrics, config| local_summary(&metrics.analysis, config.language))
}

/// Instruction to send with a photo, in the configured language
#[wasm_bindgen]
pub fn image_analysis_prompt() -> String {
    coaching::image_analysis_prompt(current_config().language).to_string()
}

/// System instruction for the coaching chat, in the configured language
#[wasm_bindgen]
pub fn chat_system_instruction() -> String {
    coaching::chat_system_instruction(current_config().language).to_string()
}

/// Parse the model's photo analysis, speak the announcement and return it
#[wasm_bindgen]
pub fn announce_image_analysis(json: &str) -> Result<String, JsValue> {
    let config = current_config();
    let analysis = ImageAnalysis::from_json(json)?;
    let text = analysis.announcement(config.language);
    if let Err(e) = BrowserVoice::new(&config).speak(&text) {
        log::warn!("announcement not spoken: {}", e);
    }
    Ok(text)
}

/// Localized display name for a shot wire name (echoed back if unknown)
#[wasm_bindgen]
pub fn shot_label(name: &str) -> String {
    match name.parse::<ShotType>() {
        Ok(shot) => shot.label(current_config().language).to_string(),
        Err(_) => name.to_string(),
    }
}
