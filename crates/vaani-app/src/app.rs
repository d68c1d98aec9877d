use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::components::composer::Composer;
use crate::components::header::Header;
use crate::components::history::HistoryPanel;
use crate::components::language_selector::LanguageSelector;
use crate::orchestrator;
use crate::state::AppState;

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new();
    let error_message = state.error_message;
    let is_recording = state.is_recording;
    provide_context(state);

    // Space toggles recording when focus is outside a form control.
    let window = web_sys::window().unwrap();
    let keydown_handler = Closure::wrap(Box::new(move |event: web_sys::KeyboardEvent| {
        if event.code() == "Space" {
            let target = event.target();
            let is_input = target
                .as_ref()
                .and_then(|t| t.dyn_ref::<web_sys::HtmlElement>())
                .map(|el| {
                    let tag = el.tag_name().to_lowercase();
                    tag == "input" || tag == "textarea" || tag == "select"
                })
                .unwrap_or(false);

            if !is_input {
                event.prevent_default();
                if is_recording.get_untracked() {
                    orchestrator::stop_recording(state);
                } else {
                    orchestrator::start_recording(state);
                }
            }
        }
    }) as Box<dyn FnMut(web_sys::KeyboardEvent)>);

    window
        .add_event_listener_with_callback("keydown", keydown_handler.as_ref().unchecked_ref())
        .unwrap();
    keydown_handler.forget();

    view! {
        <div class="min-h-screen flex flex-col">
            <Header />

            <main class="flex-1 max-w-4xl mx-auto w-full px-4 sm:px-6 lg:px-8 py-8 space-y-6">
                // Error banner
                {move || {
                    error_message.get().map(|msg| {
                        view! {
                            <div class="bg-red-50 dark:bg-red-900/20 border border-red-200 dark:border-red-800 rounded-xl p-4 flex items-center justify-between">
                                <p class="text-red-800 dark:text-red-400 text-sm">{msg.clone()}</p>
                                <button
                                    class="text-red-600 dark:text-red-400 hover:text-red-800 dark:hover:text-red-300 font-bold"
                                    on:click=move |_| error_message.set(None)
                                >
                                    "\u{2715}"
                                </button>
                            </div>
                        }
                    })
                }}

                <LanguageSelector />
                <Composer />
                <HistoryPanel />
            </main>

            <footer class="text-center py-4 text-xs text-gray-500 dark:text-gray-600">
                "Translations by MyMemory. Nothing is stored beyond this tab. "
                <kbd class="px-1.5 py-0.5 bg-gray-200 dark:bg-gray-800 rounded text-xs">"Space"</kbd>
                " to talk."
            </footer>
        </div>
    }
}
