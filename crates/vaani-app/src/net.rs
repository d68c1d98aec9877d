//! Translation Client: one fetch round-trip to the MyMemory API. URL
//! construction and body parsing live in `vaani-core`.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use vaani_core::api::{self, TranslateError};

pub async fn translate(text: &str, from: &str, to: &str) -> Result<String, TranslateError> {
    let url = api::request_url(text, from, to);

    let window = web_sys::window().ok_or_else(|| TranslateError::Transport("no window".to_string()))?;
    let response_js = JsFuture::from(window.fetch_with_str(&url))
        .await
        .map_err(|error| TranslateError::Transport(format!("{error:?}")))?;
    let response: Response = response_js
        .dyn_into()
        .map_err(|_| TranslateError::Transport("not a Response".to_string()))?;

    if !response.ok() {
        return Err(TranslateError::Transport(format!("HTTP {}", response.status())));
    }

    let body_promise = response
        .text()
        .map_err(|error| TranslateError::Transport(format!("{error:?}")))?;
    let body_js = JsFuture::from(body_promise)
        .await
        .map_err(|error| TranslateError::Transport(format!("{error:?}")))?;
    let body = body_js
        .as_string()
        .ok_or_else(|| TranslateError::Transport("non-text response body".to_string()))?;

    api::parse_translation(&body)
}
