use leptos::prelude::*;

use vaani_core::history::TranslationRecord;
use vaani_core::language;

use crate::speech::synthesis;
use crate::state::AppState;

#[component]
pub fn HistoryPanel() -> impl IntoView {
    let state = expect_context::<AppState>();
    let history = state.history;

    view! {
        <div class="card space-y-3">
            <h2 class="text-lg font-semibold">"History"</h2>

            {move || {
                if history.with(|h| h.is_empty()) {
                    view! {
                        <p class="text-sm text-gray-400 dark:text-gray-600 italic">
                            "Past translations will appear here\u{2026}"
                        </p>
                    }.into_any()
                } else {
                    view! {
                        <ul class="space-y-2">
                            {history.with(|h| h.records().to_vec()).into_iter().map(|record| {
                                view! { <HistoryEntry record /> }
                            }).collect::<Vec<_>>()}
                        </ul>
                    }.into_any()
                }
            }}
        </div>
    }
}

#[component]
fn HistoryEntry(record: TranslationRecord) -> impl IntoView {
    let state = expect_context::<AppState>();
    let history = state.history;

    let id = record.id.clone();
    let toggle_favorite = move |_| {
        let id = id.clone();
        history.update(|h| h.toggle_favorite(&id));
    };

    let target_text = record.target_text.clone();
    let target_language = record.target_language.clone();
    let replay = move |_| {
        synthesis::speak(&target_text, &target_language);
    };

    let copy_target = record.target_text.clone();
    let copy_text = move |_| {
        let window = web_sys::window().unwrap();
        let nav = window.navigator();
        let clipboard = nav.clipboard();
        let _ = clipboard.write_text(&copy_target);
    };

    let pair = format!(
        "{} \u{2192} {}",
        language::display_name(&record.source_language),
        language::display_name(&record.target_language),
    );
    let time = js_sys::Date::new(&(record.created_at_millis as f64).into())
        .to_locale_time_string("en-US")
        .as_string()
        .unwrap_or_default();
    let star = if record.is_favorite { "\u{2605}" } else { "\u{2606}" };
    let star_class = if record.is_favorite {
        "text-yellow-500 hover:text-yellow-600"
    } else {
        "text-gray-400 hover:text-yellow-500"
    };

    view! {
        <li class="border border-gray-200 dark:border-gray-800 rounded-xl p-3 space-y-1">
            <div class="flex items-center justify-between text-xs text-gray-500 dark:text-gray-400">
                <span>{pair}</span>
                <div class="flex items-center gap-2">
                    <span>{time}</span>
                    <button class="hover:text-indigo-500" on:click=replay title="Speak again">
                        "\u{1F50A}"
                    </button>
                    <button class="hover:text-indigo-500" on:click=copy_text title="Copy translation">
                        "Copy"
                    </button>
                    <button class=star_class on:click=toggle_favorite title="Favorite">
                        {star}
                    </button>
                </div>
            </div>
            <p class="text-sm text-gray-600 dark:text-gray-400">{record.source_text.clone()}</p>
            <p class="text-base font-medium">{record.target_text.clone()}</p>
        </li>
    }
}
