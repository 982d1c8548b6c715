//! Tracking session and JS bridge
//!
//! Owns the live `FramePipeline` between `start_tracking` and
//! `stop_tracking`. JS calls `process_landmarks` once per pose result;
//! each call runs a full tick synchronously.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::pipeline::{FramePipeline, FrameOutcome, LiveMetrics, MetricsSink};

use super::voice::BrowserVoice;

/// Delivers metrics snapshots to a JS callback as plain objects
struct JsMetricsSink {
    callback: js_sys::Function,
}

impl MetricsSink for JsMetricsSink {
    fn publish(&mut self, metrics: &LiveMetrics) {
        let json = match serde_json::to_string(metrics) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("metrics not serializable: {}", e);
                return;
            }
        };
        let result = js_sys::JSON::parse(&json)
            .and_then(|value| self.callback.call1(&JsValue::NULL, &value));
        if let Err(e) = result {
            log::warn!("onMetricsUpdate callback failed: {:?}", e);
        }
    }
}

/// Holds the snapshot until the bridge borrow is released, so the JS
/// callback may call back into the bridge
#[derive(Default)]
struct Deferred(Option<LiveMetrics>);

impl MetricsSink for Deferred {
    fn publish(&mut self, metrics: &LiveMetrics) {
        self.0 = Some(metrics.clone());
    }
}

struct TrackerSession {
    pipeline: FramePipeline,
    voice: BrowserVoice,
    sink: JsMetricsSink,
}

/// Bridge state that outlives individual sessions
#[derive(Default)]
struct BridgeState {
    config: EngineConfig,
    auto_coaching: bool,
    session: Option<TrackerSession>,
}

// Thread-local storage (WASM is single-threaded)
thread_local! {
    static BRIDGE: RefCell<BridgeState> = RefCell::new(BridgeState::default());
}

/// Snapshot of the active configuration
pub(crate) fn current_config() -> EngineConfig {
    BRIDGE.with(|b| b.borrow().config.clone())
}

/// Run `f` on the most recent metrics of the active session
pub(crate) fn with_last_metrics<R>(f: impl FnOnce(&LiveMetrics, &EngineConfig) -> R) -> Option<R> {
    BRIDGE.with(|b| {
        let bridge = b.borrow();
        let session = bridge.session.as_ref()?;
        session
            .pipeline
            .last_metrics()
            .map(|metrics| f(metrics, &bridge.config))
    })
}

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Replace the engine configuration from (partial) JSON
#[wasm_bindgen]
pub fn configure(json: &str) -> Result<(), JsValue> {
    let config = EngineConfig::from_json(json)?;
    log::info!(
        "configured: {:?}-handed, {:?}",
        config.handedness,
        config.language
    );
    BRIDGE.with(|b| {
        let mut bridge = b.borrow_mut();
        if let Some(session) = bridge.session.as_mut() {
            session.pipeline.set_config(config.clone());
            session.voice = BrowserVoice::new(&config);
        }
        bridge.config = config;
    });
    Ok(())
}

/// Active configuration as JSON
#[wasm_bindgen]
pub fn current_config_json() -> Result<String, JsValue> {
    Ok(current_config().to_json()?)
}

/// Begin a fresh session; `on_metrics(snapshot)` is called every analyzed frame
#[wasm_bindgen]
pub fn start_tracking(on_metrics: js_sys::Function) {
    BRIDGE.with(|b| {
        let mut bridge = b.borrow_mut();
        let mut pipeline = FramePipeline::new(bridge.config.clone());
        pipeline.set_auto_coaching(bridge.auto_coaching);
        let session = TrackerSession {
            pipeline,
            voice: BrowserVoice::new(&bridge.config),
            sink: JsMetricsSink { callback: on_metrics },
        };
        bridge.session = Some(session);
    });
    log::info!("tracking started");
}

/// End the session, discarding coaching state and the metrics callback
#[wasm_bindgen]
pub fn stop_tracking() {
    let ended = BRIDGE.with(|b| b.borrow_mut().session.take());
    if let Some(session) = ended {
        let stats = session.pipeline.stats();
        log::info!(
            "tracking stopped: {} analyzed, {} skipped, {} cues, {} voice failures",
            stats.frames_analyzed,
            stats.frames_skipped,
            stats.cues_spoken,
            stats.voice_failures
        );
    }
}

#[wasm_bindgen]
pub fn is_tracking() -> bool {
    BRIDGE.with(|b| b.borrow().session.is_some())
}

/// Toggle spoken auto-coaching; read on every tick
#[wasm_bindgen]
pub fn set_auto_coaching(enabled: bool) {
    BRIDGE.with(|b| {
        let mut bridge = b.borrow_mut();
        bridge.auto_coaching = enabled;
        if let Some(session) = bridge.session.as_mut() {
            session.pipeline.set_auto_coaching(enabled);
        }
    });
    log::info!("auto-coaching {}", if enabled { "on" } else { "off" });
}

/// Feed one pose result (flat Float32Array, 33x3 or 33x4)
///
/// Returns true if the frame was analyzed. An empty array means the pose
/// model found nobody this frame.
#[wasm_bindgen]
pub fn process_landmarks(data: &[f32]) -> Result<bool, JsValue> {
    let now_ms = js_sys::Date::now();
    let mut deferred = Deferred::default();

    let (outcome, mut sink) = BRIDGE.with(|b| {
        let mut bridge = b.borrow_mut();
        let session = bridge.session.as_mut().ok_or(EngineError::NoSession)?;
        let outcome = session
            .pipeline
            .process_frame(data, now_ms, &mut session.voice, &mut deferred);
        let sink = JsMetricsSink {
            callback: session.sink.callback.clone(),
        };
        Ok::<_, EngineError>((outcome, sink))
    })?;

    if let Some(metrics) = deferred.0 {
        sink.publish(&metrics);
    }
    Ok(matches!(outcome, FrameOutcome::Analyzed { .. }))
}

/// Latest metrics snapshot as JSON, if a frame has been analyzed
#[wasm_bindgen]
pub fn last_metrics_json() -> Option<String> {
    with_last_metrics(|metrics, _| serde_json::to_string(metrics).ok()).flatten()
}

/// Session counters as JSON
#[wasm_bindgen]
pub fn session_stats_json() -> Option<String> {
    BRIDGE.with(|b| {
        let bridge = b.borrow();
        let session = bridge.session.as_ref()?;
        serde_json::to_string(&session.pipeline.stats()).ok()
    })
}
