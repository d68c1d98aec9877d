use leptos::prelude::*;

use vaani_core::history::History;
use vaani_core::pipeline::Pipeline;

pub const DEFAULT_SOURCE: &str = "en";
pub const DEFAULT_TARGET: &str = "ta";

/// Reactive view of the pipeline plus the things the pipeline does not own
/// (history, error banner). The [`Pipeline`] in `pipeline` is the single
/// source of truth for session state; the signals mirror it for rendering
/// and are resynced by the orchestrator after every dispatched event.
#[derive(Clone, Copy)]
pub struct AppState {
    pub pipeline: StoredValue<Pipeline>,
    pub history: RwSignal<History>,
    pub input_text: RwSignal<String>,
    pub source_language: RwSignal<String>,
    pub target_language: RwSignal<String>,
    pub is_recording: RwSignal<bool>,
    pub is_translating: RwSignal<bool>,
    pub auto_translate: RwSignal<bool>,
    pub error_message: RwSignal<Option<String>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            pipeline: StoredValue::new(Pipeline::new(
                DEFAULT_SOURCE.to_string(),
                DEFAULT_TARGET.to_string(),
            )),
            history: RwSignal::new(History::new()),
            input_text: RwSignal::new(String::new()),
            source_language: RwSignal::new(DEFAULT_SOURCE.to_string()),
            target_language: RwSignal::new(DEFAULT_TARGET.to_string()),
            is_recording: RwSignal::new(false),
            is_translating: RwSignal::new(false),
            auto_translate: RwSignal::new(true),
            error_message: RwSignal::new(None),
        }
    }
}
