//! Error types shared by the engine and the JS bridge
//!
//! Nothing here is fatal. Landmark errors mean "skip this tick", voice
//! errors mean "the cue was not heard", and payload/config errors are
//! returned to the caller of the bridge function that received bad input.

use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::bridge::Joint;

/// Why a frame's landmark data was rejected at the boundary
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LandmarkError {
    #[error("no landmarks detected")]
    Empty,

    #[error("expected at least {expected} landmarks, got {actual}")]
    TooFewLandmarks { expected: usize, actual: usize },

    #[error("flat landmark buffer has {0} values (expected 33x3 or 33x4)")]
    BadFlatLength(usize),

    #[error("landmark {0:?} has a non-finite coordinate")]
    NonFinite(Joint),

    #[error("landmark {0:?} is far outside the frame")]
    OutOfRange(Joint),
}

/// Failures of the external speech capability
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VoiceError {
    #[error("speech API unavailable: {0}")]
    Unavailable(String),

    #[error("speech request rejected: {0}")]
    Rejected(String),
}

/// Errors surfaced through bridge entry points
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Landmarks(#[from] LandmarkError),

    #[error(transparent)]
    Voice(#[from] VoiceError),

    #[error("invalid configuration: {0}")]
    Config(#[source] serde_json::Error),

    #[error("invalid configuration: {field} {requirement}")]
    Setting {
        field: &'static str,
        requirement: &'static str,
    },

    #[error("invalid assistant payload: {0}")]
    Payload(#[source] serde_json::Error),

    #[error("no tracking session is active")]
    NoSession,
}

impl From<EngineError> for JsValue {
    fn from(err: EngineError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl From<VoiceError> for JsValue {
    fn from(err: VoiceError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl From<LandmarkError> for JsValue {
    fn from(err: LandmarkError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
