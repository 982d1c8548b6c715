//! Browser speech capability
//!
//! Synthesis via `speechSynthesis`, single-shot recognition via
//! `SpeechRecognition` (or the prefixed `webkitSpeechRecognition`).

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{SpeechRecognition, SpeechRecognitionEvent, SpeechSynthesisUtterance};

use crate::config::EngineConfig;
use crate::error::VoiceError;
use crate::pipeline::Speaker;

use super::session::current_config;

/// Recognition constructor names, in lookup order
const RECOGNITION_CTORS: [&str; 2] = ["SpeechRecognition", "webkitSpeechRecognition"];

fn js_error(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

// ============================================================================
// SYNTHESIS
// ============================================================================

/// `Speaker` backed by the Web Speech synthesis API
pub struct BrowserVoice {
    lang: &'static str,
    rate: f32,
    pitch: f32,
}

impl BrowserVoice {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            lang: config.language.speech_tag(),
            rate: config.voice.rate,
            pitch: config.voice.pitch,
        }
    }
}

impl Speaker for BrowserVoice {
    fn speak(&mut self, text: &str) -> Result<(), VoiceError> {
        let window = web_sys::window().ok_or_else(|| VoiceError::Unavailable("no window".into()))?;
        let synth = window
            .speech_synthesis()
            .map_err(|e| VoiceError::Unavailable(js_error(&e)))?;
        let utterance = SpeechSynthesisUtterance::new_with_text(text)
            .map_err(|e| VoiceError::Rejected(js_error(&e)))?;
        utterance.set_lang(self.lang);
        utterance.set_rate(self.rate);
        utterance.set_pitch(self.pitch);

        // New cue interrupts whatever is still playing
        synth.cancel();
        synth.speak(&utterance);
        Ok(())
    }
}

// ============================================================================
// RECOGNITION
// ============================================================================

/// One single-shot recognition session and the callbacks it keeps alive
struct Recognizer {
    recognition: SpeechRecognition,
    listening: Rc<Cell<bool>>,
    _on_result: Closure<dyn FnMut(SpeechRecognitionEvent)>,
    _on_end: Closure<dyn FnMut()>,
}

impl Recognizer {
    /// Unhook the callbacks so the browser cannot reach them once dropped
    fn detach(&self) {
        self.recognition.set_onresult(None);
        self.recognition.set_onend(None);
    }
}

/// The active value plus the one it replaced
///
/// A replaced recognizer may still be inside its `onend` (JS calling
/// `listen` from `onEnd`), so it is parked for one generation instead of
/// being dropped on the spot.
struct Slots<T> {
    active: Option<T>,
    retired: Option<T>,
}

impl<T> Slots<T> {
    const fn new() -> Self {
        Self {
            active: None,
            retired: None,
        }
    }

    fn active(&self) -> Option<&T> {
        self.active.as_ref()
    }

    /// Install `next`, parking the replaced value after `retire` runs on it
    fn install(&mut self, next: T, retire: impl FnOnce(&T)) {
        if let Some(previous) = self.active.replace(next) {
            retire(&previous);
            self.retired = Some(previous);
        }
    }
}

thread_local! {
    static RECOGNIZER: RefCell<Slots<Recognizer>> = const { RefCell::new(Slots::new()) };
}

fn new_recognition(lang: &str) -> Result<SpeechRecognition, VoiceError> {
    let window = web_sys::window().ok_or_else(|| VoiceError::Unavailable("no window".into()))?;

    let ctor = RECOGNITION_CTORS
        .iter()
        .filter_map(|name| js_sys::Reflect::get(&window, &JsValue::from_str(name)).ok())
        .find(|value| value.is_function())
        .ok_or_else(|| VoiceError::Unavailable("speech recognition not supported".into()))?;

    let instance = js_sys::Reflect::construct(ctor.unchecked_ref::<js_sys::Function>(), &js_sys::Array::new())
        .map_err(|e| VoiceError::Rejected(js_error(&e)))?;
    let recognition: SpeechRecognition = instance.unchecked_into();

    recognition.set_continuous(false);
    recognition.set_interim_results(false);
    recognition.set_lang(lang);
    Ok(recognition)
}

fn start_listening(on_result: js_sys::Function, on_end: js_sys::Function) -> Result<(), VoiceError> {
    let already = RECOGNIZER.with(|r| {
        r.borrow()
            .active()
            .is_some_and(|recognizer| recognizer.listening.get())
    });
    if already {
        log::debug!("listen ignored: recognition already active");
        return Ok(());
    }

    let lang = current_config().language.speech_tag();
    let recognition = new_recognition(lang)?;
    let listening = Rc::new(Cell::new(false));

    let result_cb = Closure::<dyn FnMut(SpeechRecognitionEvent)>::new(
        move |event: SpeechRecognitionEvent| {
            let transcript = event
                .results()
                .and_then(|list| list.get(0))
                .and_then(|result| result.get(0))
                .map(|alternative| alternative.transcript());
            if let Some(text) = transcript {
                log::debug!("recognized: {}", text);
                if let Err(e) = on_result.call1(&JsValue::NULL, &JsValue::from_str(&text)) {
                    log::warn!("onResult callback failed: {}", js_error(&e));
                }
            }
        },
    );

    let end_flag = Rc::clone(&listening);
    let end_cb = Closure::<dyn FnMut()>::new(move || {
        end_flag.set(false);
        if let Err(e) = on_end.call0(&JsValue::NULL) {
            log::warn!("onEnd callback failed: {}", js_error(&e));
        }
    });

    recognition.set_onresult(Some(result_cb.as_ref().unchecked_ref()));
    recognition.set_onend(Some(end_cb.as_ref().unchecked_ref()));
    recognition
        .start()
        .map_err(|e| VoiceError::Rejected(js_error(&e)))?;
    listening.set(true);

    let recognizer = Recognizer {
        recognition,
        listening,
        _on_result: result_cb,
        _on_end: end_cb,
    };
    RECOGNIZER.with(|r| r.borrow_mut().install(recognizer, Recognizer::detach));
    Ok(())
}

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Speak arbitrary text (chat replies, summaries), interrupting any cue
#[wasm_bindgen]
pub fn speak(text: &str) -> Result<(), JsValue> {
    BrowserVoice::new(&current_config())
        .speak(text)
        .map_err(|e| {
            log::warn!("speak failed: {}", e);
            JsValue::from(e)
        })
}

/// Start single-shot recognition: `on_result(text)` then `on_end()`
#[wasm_bindgen]
pub fn listen(on_result: js_sys::Function, on_end: js_sys::Function) -> Result<(), JsValue> {
    start_listening(on_result, on_end).map_err(|e| {
        log::warn!("listen failed: {}", e);
        JsValue::from(e)
    })
}

/// Stop an active recognition session (no-op otherwise)
#[wasm_bindgen]
pub fn stop_listening() {
    RECOGNIZER.with(|r| {
        if let Some(recognizer) = r.borrow().active() {
            if recognizer.listening.get() {
                recognizer.recognition.stop();
                recognizer.listening.set(false);
            }
        }
    });
}
