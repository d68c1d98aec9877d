//! Request/response contract of the MyMemory translation service. The HTTP
//! round-trip itself lives in the app crate; everything here is plain data
//! so it can be tested natively.

use serde::Deserialize;
use thiserror::Error;

pub const ENDPOINT: &str = "https://api.mymemory.translated.net/get";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    /// The request never produced a usable response (network failure,
    /// non-OK HTTP status, unreadable body).
    #[error("translation request failed: {0}")]
    Transport(String),
    /// The service answered but reported a non-200 `responseStatus`.
    #[error("{0}")]
    Rejected(String),
    #[error("malformed translation response: {0}")]
    Malformed(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    response_status: i64,
    #[serde(default)]
    response_data: Option<ResponseData>,
    #[serde(default)]
    response_details: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseData {
    translated_text: String,
}

/// GET URL for one translation: `q` is the source text, `langpair` is
/// `"{from}|{to}"`, both percent-encoded.
pub fn request_url(text: &str, from: &str, to: &str) -> String {
    let langpair = format!("{from}|{to}");
    format!(
        "{ENDPOINT}?q={}&langpair={}",
        urlencoding::encode(text),
        urlencoding::encode(&langpair)
    )
}

/// Maps a response body to the translated text, or to the service's
/// human-readable failure message.
pub fn parse_translation(body: &str) -> Result<String, TranslateError> {
    let response: ApiResponse =
        serde_json::from_str(body).map_err(|error| TranslateError::Malformed(error.to_string()))?;

    if response.response_status == 200 {
        response
            .response_data
            .map(|data| data.translated_text)
            .ok_or_else(|| TranslateError::Malformed("missing responseData".to_string()))
    } else {
        let message = response
            .response_details
            .unwrap_or_else(|| format!("translation service returned status {}", response.response_status));
        Err(TranslateError::Rejected(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_encodes_text_and_langpair() {
        let url = request_url("good morning!", "en", "ta");
        assert_eq!(
            url,
            "https://api.mymemory.translated.net/get?q=good%20morning%21&langpair=en%7Cta"
        );
    }

    #[test]
    fn parses_successful_response() {
        let body = r#"{
            "responseStatus": 200,
            "responseData": { "translatedText": "வணக்கம்" }
        }"#;
        assert_eq!(parse_translation(body).unwrap(), "வணக்கம்");
    }

    #[test]
    fn non_200_status_carries_the_service_message() {
        let body = r#"{
            "responseStatus": 403,
            "responseDetails": "INVALID LANGUAGE PAIR SPECIFIED"
        }"#;
        assert_eq!(
            parse_translation(body),
            Err(TranslateError::Rejected("INVALID LANGUAGE PAIR SPECIFIED".to_string()))
        );
    }

    #[test]
    fn non_200_status_without_details_gets_a_generic_message() {
        let body = r#"{ "responseStatus": 429 }"#;
        assert_eq!(
            parse_translation(body),
            Err(TranslateError::Rejected(
                "translation service returned status 429".to_string()
            ))
        );
    }

    #[test]
    fn success_without_payload_is_malformed() {
        let body = r#"{ "responseStatus": 200 }"#;
        assert!(matches!(parse_translation(body), Err(TranslateError::Malformed(_))));
    }

    #[test]
    fn garbage_body_is_malformed() {
        assert!(matches!(
            parse_translation("<html>rate limited</html>"),
            Err(TranslateError::Malformed(_))
        ));
    }
}
