use leptos::prelude::*;

use vaani_core::pipeline::PipelineEvent;

use crate::orchestrator::{self, dispatch};
use crate::speech::recognition;
use crate::state::AppState;

#[component]
pub fn Composer() -> impl IntoView {
    let state = expect_context::<AppState>();

    let input_text = state.input_text;
    let is_recording = state.is_recording;
    let is_translating = state.is_translating;
    let auto_translate = state.auto_translate;

    let on_input = move |ev| {
        let text = event_target_value(&ev);
        dispatch(state, PipelineEvent::TextChanged { text });
    };

    let on_submit = move |_| {
        dispatch(state, PipelineEvent::Submit);
    };

    let toggle_recording = move |_| {
        if is_recording.get_untracked() {
            orchestrator::stop_recording(state);
        } else {
            orchestrator::start_recording(state);
        }
    };

    let toggle_auto = move |ev| {
        let enabled = event_target_checked(&ev);
        dispatch(state, PipelineEvent::AutoTranslateToggled { enabled });
    };

    let can_submit = move || !input_text.get().trim().is_empty() && !is_translating.get();

    let record_label = move || if is_recording.get() { "Stop" } else { "Speak" };

    let record_class = move || {
        let base = "px-6 py-2.5 font-semibold rounded-xl transition-all duration-200 shadow active:scale-95";
        if is_recording.get() {
            format!("{base} bg-red-600 hover:bg-red-700 text-white animate-pulse")
        } else {
            format!("{base} bg-indigo-600 hover:bg-indigo-700 text-white disabled:opacity-50 disabled:cursor-not-allowed")
        }
    };

    view! {
        <div class="card space-y-3">
            <textarea
                class="w-full min-h-28 px-3 py-2 bg-gray-100 dark:bg-gray-800 border border-gray-300 dark:border-gray-700 rounded-lg text-sm focus:ring-2 focus:ring-indigo-500 focus:border-transparent resize-y"
                placeholder="Type here, or press Speak and talk\u{2026}"
                prop:value=move || input_text.get()
                on:input=on_input
            ></textarea>

            <div class="flex flex-col sm:flex-row items-center justify-between gap-3">
                <div class="flex items-center gap-2">
                    <button class=record_class on:click=toggle_recording>
                        {record_label}
                    </button>
                    <button
                        class="px-6 py-2.5 font-semibold rounded-xl bg-gray-200 dark:bg-gray-800 hover:bg-gray-300 dark:hover:bg-gray-700 transition-colors disabled:opacity-50 disabled:cursor-not-allowed"
                        on:click=on_submit
                        disabled=move || !can_submit()
                    >
                        {move || if is_translating.get() { "Translating\u{2026}" } else { "Translate" }}
                    </button>
                </div>

                <label class="flex items-center gap-2 text-sm text-gray-600 dark:text-gray-400 cursor-pointer">
                    <input
                        type="checkbox"
                        class="rounded accent-indigo-600"
                        prop:checked=move || auto_translate.get()
                        on:change=toggle_auto
                    />
                    "Translate as I go"
                </label>
            </div>

            {move || {
                (!recognition::is_supported()).then(|| view! {
                    <p class="text-xs text-gray-500 dark:text-gray-400">
                        "Voice input is unavailable in this browser; typing still works."
                    </p>
                })
            }}
        </div>
    }
}
