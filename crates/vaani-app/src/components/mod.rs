pub mod composer;
pub mod header;
pub mod history;
pub mod language_selector;
