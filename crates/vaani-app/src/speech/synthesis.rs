//! Speech Output Adapter: one active utterance at a time, new requests
//! preempt the current one. Playback failures never reach the pipeline;
//! they are logged and dropped.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{SpeechSynthesis, SpeechSynthesisErrorEvent, SpeechSynthesisUtterance, SpeechSynthesisVoice};

const RATE: f32 = 0.9;
const PITCH: f32 = 1.0;
const VOLUME: f32 = 1.0;

pub fn speak(text: &str, language: &str) {
    if let Err(error) = try_speak(text, language) {
        log::warn!("speech synthesis unavailable: {error:?}");
    }
}

fn try_speak(text: &str, language: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let synthesis = window.speech_synthesis()?;

    // Cancel before speak: the sink never holds two utterances from us.
    synthesis.cancel();

    let utterance = SpeechSynthesisUtterance::new_with_text(text)?;
    utterance.set_lang(language);
    utterance.set_rate(RATE);
    utterance.set_pitch(PITCH);
    utterance.set_volume(VOLUME);
    if let Some(voice) = matching_voice(&synthesis, language) {
        utterance.set_voice(Some(&voice));
    }

    let on_error = Closure::wrap(Box::new(move |event: SpeechSynthesisErrorEvent| {
        log::warn!("speech synthesis playback error: {:?}", event.error());
    }) as Box<dyn FnMut(SpeechSynthesisErrorEvent)>);
    utterance.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    on_error.forget();

    synthesis.speak(&utterance);
    Ok(())
}

/// First voice whose locale shares the primary subtag with `language`;
/// `None` leaves the platform default in place.
fn matching_voice(synthesis: &SpeechSynthesis, language: &str) -> Option<SpeechSynthesisVoice> {
    let prefix = language
        .split('-')
        .next()
        .unwrap_or(language)
        .to_ascii_lowercase();

    for value in synthesis.get_voices().iter() {
        let voice: SpeechSynthesisVoice = value.unchecked_into();
        let voice_lang = voice.lang().to_ascii_lowercase();
        if voice_lang == prefix || voice_lang.starts_with(&format!("{prefix}-")) {
            return Some(voice);
        }
    }
    None
}
