//! Speech Capture Adapter: bridges the browser recognition engine to typed
//! [`CaptureEvent`]s. The engine is continuous and interim-result-inclusive;
//! the running transcript is rebuilt from indexed results on every event.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{SpeechRecognition, SpeechRecognitionError, SpeechRecognitionEvent};

use vaani_core::transcript::TranscriptAssembler;

#[derive(Debug, Clone, PartialEq)]
pub enum CaptureEvent {
    /// The accumulated transcript changed (interim or final results).
    TranscriptUpdated(String),
    /// The engine stopped, whether asked to or on its own (silence timeout).
    /// An `Error` is always followed by one of these.
    Ended,
    Error(String),
}

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("no speech recognition engine available")]
    Unsupported,
    #[error("{0}")]
    Start(String),
}

thread_local! {
    static RECOGNITION: RefCell<Option<SpeechRecognition>> = RefCell::new(None);
}

// Chrome still ships the engine webkit-prefixed, so the constructor is
// resolved by name rather than through the web-sys binding directly.
fn engine_constructor() -> Option<js_sys::Function> {
    let global = js_sys::global();
    for name in ["SpeechRecognition", "webkitSpeechRecognition"] {
        if let Ok(value) = js_sys::Reflect::get(&global, &JsValue::from_str(name)) {
            if let Some(constructor) = value.dyn_ref::<js_sys::Function>() {
                return Some(constructor.clone());
            }
        }
    }
    None
}

pub fn is_supported() -> bool {
    engine_constructor().is_some()
}

/// Begins a continuous recognition session in `language`. Events are
/// delivered through `on_event` until [`CaptureEvent::Ended`]. Starting
/// while a session is active is a caller contract violation and is
/// rejected.
pub fn start(
    language: &str,
    on_event: impl Fn(CaptureEvent) + Clone + 'static,
) -> Result<(), CaptureError> {
    if RECOGNITION.with(|slot| slot.borrow().is_some()) {
        return Err(CaptureError::Start("a capture session is already active".to_string()));
    }

    let constructor = engine_constructor().ok_or(CaptureError::Unsupported)?;
    let instance = js_sys::Reflect::construct(&constructor, &js_sys::Array::new())
        .map_err(|error| CaptureError::Start(format!("{error:?}")))?;
    let recognition: SpeechRecognition = instance.unchecked_into();

    recognition.set_continuous(true);
    recognition.set_interim_results(true);
    recognition.set_lang(language);

    let assembler = Rc::new(RefCell::new(TranscriptAssembler::new()));

    let on_result = {
        let on_event = on_event.clone();
        let assembler = Rc::clone(&assembler);
        Closure::wrap(Box::new(move |event: SpeechRecognitionEvent| {
            if let Some(results) = event.results() {
                let mut assembler = assembler.borrow_mut();
                for index in event.result_index()..results.length() {
                    if let Some(result) = results.get(index) {
                        if let Some(alternative) = result.get(0) {
                            assembler.set_segment(index as usize, alternative.transcript());
                        }
                    }
                }
            }
            on_event(CaptureEvent::TranscriptUpdated(assembler.borrow().transcript()));
        }) as Box<dyn FnMut(SpeechRecognitionEvent)>)
    };
    recognition.set_onresult(Some(on_result.as_ref().unchecked_ref()));
    on_result.forget();

    let on_error = {
        let on_event = on_event.clone();
        Closure::wrap(Box::new(move |event: SpeechRecognitionError| {
            let code = format!("{:?}", event.error());
            log::warn!("speech recognition error: {code}");
            on_event(CaptureEvent::Error(code));
        }) as Box<dyn FnMut(SpeechRecognitionError)>)
    };
    recognition.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    on_error.forget();

    let on_end = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        RECOGNITION.with(|slot| slot.borrow_mut().take());
        on_event(CaptureEvent::Ended);
    }) as Box<dyn FnMut(web_sys::Event)>);
    recognition.set_onend(Some(on_end.as_ref().unchecked_ref()));
    on_end.forget();

    recognition
        .start()
        .map_err(|error| CaptureError::Start(format!("{error:?}")))?;

    RECOGNITION.with(|slot| *slot.borrow_mut() = Some(recognition));
    Ok(())
}

/// Asks the engine to end the current session; the engine answers with its
/// end event. Idempotent when nothing is running.
pub fn stop() {
    RECOGNITION.with(|slot| {
        if let Some(recognition) = slot.borrow_mut().take() {
            recognition.stop();
        }
    });
}
