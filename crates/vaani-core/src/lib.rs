//! Browser-independent core of Vaani: the translation pipeline state machine,
//! the history store, the language catalog, transcript assembly and the
//! MyMemory request/response contract.

pub mod api;
pub mod history;
pub mod language;
pub mod pipeline;
pub mod transcript;
