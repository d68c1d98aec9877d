//! Event dispatch loop: feeds [`PipelineEvent`]s to the core state machine
//! and executes the [`Effect`]s it returns against the browser (debounce
//! timer, fetch, speech engines, history store).

use std::cell::RefCell;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use vaani_core::pipeline::{Effect, PipelineEvent, DEBOUNCE_MILLIS};

use crate::net;
use crate::speech::recognition::{self, CaptureError, CaptureEvent};
use crate::speech::synthesis;
use crate::state::AppState;

// The pending debounce timer is a JS-owned resource; at most one exists.
thread_local! {
    static DEBOUNCE_TIMER: RefCell<Option<i32>> = RefCell::new(None);
}

/// Runs one event to completion: update the pipeline, mirror its state into
/// the signals, then execute the requested effects. Effects may dispatch
/// further events (fetch completion, timer fire) on later turns.
pub fn dispatch(state: AppState, event: PipelineEvent) {
    let mut effects = Vec::new();
    state.pipeline.update_value(|pipeline| effects = pipeline.handle(event));
    sync(state);
    for effect in effects {
        run(state, effect);
    }
}

fn sync(state: AppState) {
    state.pipeline.with_value(|pipeline| {
        if state.input_text.with_untracked(|text| text != &pipeline.input_text) {
            state.input_text.set(pipeline.input_text.clone());
        }
        if state.source_language.with_untracked(|code| code != &pipeline.source_language) {
            state.source_language.set(pipeline.source_language.clone());
        }
        if state.target_language.with_untracked(|code| code != &pipeline.target_language) {
            state.target_language.set(pipeline.target_language.clone());
        }
        if state.is_recording.get_untracked() != pipeline.is_recording {
            state.is_recording.set(pipeline.is_recording);
        }
        if state.is_translating.get_untracked() != pipeline.is_translating {
            state.is_translating.set(pipeline.is_translating);
        }
        if state.auto_translate.get_untracked() != pipeline.auto_translate {
            state.auto_translate.set(pipeline.auto_translate);
        }
    });
}

fn run(state: AppState, effect: Effect) {
    match effect {
        Effect::ScheduleDebounce => schedule_debounce(state),
        Effect::CancelDebounce => cancel_debounce(),
        Effect::BeginTranslation { seq, text, source_language, target_language } => {
            spawn_local(async move {
                let outcome = net::translate(&text, &source_language, &target_language).await;
                dispatch(
                    state,
                    PipelineEvent::TranslationFinished {
                        seq,
                        source_text: text,
                        source_language,
                        target_language,
                        outcome,
                    },
                );
            });
        }
        Effect::AppendRecord { source_text, source_language, target_text, target_language } => {
            let now_millis = js_sys::Date::now() as u64;
            state.history.update(|history| {
                history.append_new(source_text, source_language, target_text, target_language, now_millis);
            });
        }
        Effect::Speak { text, language } => synthesis::speak(&text, &language),
        Effect::StopRecognition => recognition::stop(),
        Effect::ReportError { message } => state.error_message.set(Some(message)),
    }
}

fn schedule_debounce(state: AppState) {
    cancel_debounce();
    let Some(window) = web_sys::window() else {
        return;
    };
    let callback = Closure::once_into_js(move || {
        DEBOUNCE_TIMER.with(|timer| *timer.borrow_mut() = None);
        dispatch(state, PipelineEvent::DebounceFired);
    });
    match window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        DEBOUNCE_MILLIS as i32,
    ) {
        Ok(handle) => DEBOUNCE_TIMER.with(|timer| *timer.borrow_mut() = Some(handle)),
        Err(error) => log::warn!("failed to schedule debounce timer: {error:?}"),
    }
}

fn cancel_debounce() {
    DEBOUNCE_TIMER.with(|timer| {
        if let Some(handle) = timer.borrow_mut().take() {
            if let Some(window) = web_sys::window() {
                window.clear_timeout_with_handle(handle);
            }
        }
    });
}

/// Starts a capture session in the pipeline's source language. An absent
/// recognition engine surfaces as a user-visible notice, not a crash.
pub fn start_recording(state: AppState) {
    let language = state.pipeline.with_value(|pipeline| pipeline.source_language.clone());
    let result = recognition::start(&language, move |event| {
        dispatch(
            state,
            match event {
                CaptureEvent::TranscriptUpdated(text) => PipelineEvent::TranscriptUpdated { text },
                CaptureEvent::Ended => PipelineEvent::RecognitionEnded,
                CaptureEvent::Error(code) => PipelineEvent::RecognitionFailed { code },
            },
        );
    });
    match result {
        Ok(()) => dispatch(state, PipelineEvent::RecordingStarted),
        Err(CaptureError::Unsupported) => {
            state.error_message.set(Some(
                "Speech recognition is not supported in this browser.".to_string(),
            ));
        }
        Err(error) => {
            state.error_message.set(Some(format!("Could not start listening: {error}")));
        }
    }
}

pub fn stop_recording(state: AppState) {
    dispatch(state, PipelineEvent::RecordingStopped);
}
