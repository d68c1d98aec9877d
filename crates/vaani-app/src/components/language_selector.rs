use leptos::ev;
use leptos::prelude::*;

use vaani_core::language;
use vaani_core::pipeline::PipelineEvent;

use crate::orchestrator::dispatch;
use crate::state::AppState;

#[component]
pub fn LanguageSelector() -> impl IntoView {
    let state = expect_context::<AppState>();

    let on_source_change = move |ev: ev::Event| {
        let code = event_target_value(&ev);
        dispatch(state, PipelineEvent::SourceLanguageChanged { code });
    };

    let on_target_change = move |ev: ev::Event| {
        let code = event_target_value(&ev);
        dispatch(state, PipelineEvent::TargetLanguageChanged { code });
    };

    view! {
        <div class="card">
            <div class="flex flex-col sm:flex-row items-center gap-4">
                <div class="flex-1 w-full">
                    <label class="block text-sm font-medium text-gray-700 dark:text-gray-300 mb-1">
                        "Speak in"
                    </label>
                    <select
                        class="w-full px-3 py-2 bg-gray-100 dark:bg-gray-800 border border-gray-300 dark:border-gray-700 rounded-lg text-sm focus:ring-2 focus:ring-indigo-500 focus:border-transparent"
                        on:change=on_source_change
                    >
                        {language::all().iter().map(|lang| {
                            let code = lang.code;
                            let label = format!("{} ({})", lang.name, lang.native_name);
                            view! {
                                <option value=code selected=move || state.source_language.get() == code>
                                    {label}
                                </option>
                            }
                        }).collect::<Vec<_>>()}
                    </select>
                </div>

                <div class="hidden sm:flex items-center pt-6">
                    <span class="text-gray-400 text-xl">"\u{2192}"</span>
                </div>

                <div class="flex-1 w-full">
                    <label class="block text-sm font-medium text-gray-700 dark:text-gray-300 mb-1">
                        "Hear in"
                    </label>
                    <select
                        class="w-full px-3 py-2 bg-gray-100 dark:bg-gray-800 border border-gray-300 dark:border-gray-700 rounded-lg text-sm focus:ring-2 focus:ring-indigo-500 focus:border-transparent"
                        on:change=on_target_change
                    >
                        {language::all().iter().map(|lang| {
                            let code = lang.code;
                            let label = format!("{} ({})", lang.name, lang.native_name);
                            view! {
                                <option value=code selected=move || state.target_language.get() == code>
                                    {label}
                                </option>
                            }
                        }).collect::<Vec<_>>()}
                    </select>
                </div>
            </div>
        </div>
    }
}
