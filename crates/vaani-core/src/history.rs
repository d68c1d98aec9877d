/// A completed translation, owned by [`History`]. Only `is_favorite` is
/// mutable after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRecord {
    pub id: String,
    pub source_text: String,
    pub source_language: String,
    pub target_text: String,
    pub target_language: String,
    pub created_at_millis: u64,
    pub is_favorite: bool,
}

/// In-memory, newest-first list of translations. No eviction, no
/// persistence; reset on page reload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    records: Vec<TranslationRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from a successful translation and inserts it at the
    /// front. The id is the capture timestamp rendered as a string, which
    /// sorts by recency well enough for a session-scoped list.
    pub fn append_new(
        &mut self,
        source_text: String,
        source_language: String,
        target_text: String,
        target_language: String,
        now_millis: u64,
    ) {
        self.records.insert(
            0,
            TranslationRecord {
                id: now_millis.to_string(),
                source_text,
                source_language,
                target_text,
                target_language,
                created_at_millis: now_millis,
                is_favorite: false,
            },
        );
    }

    /// Flips the favorite flag on the matching record. Unknown ids are a
    /// no-op, not an error.
    pub fn toggle_favorite(&mut self, id: &str) {
        if let Some(record) = self.records.iter_mut().find(|record| record.id == id) {
            record.is_favorite = !record.is_favorite;
        }
    }

    /// Newest-first snapshot.
    pub fn records(&self) -> &[TranslationRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(history: &mut History, source: &str, target: &str, millis: u64) {
        history.append_new(
            source.to_string(),
            "en".to_string(),
            target.to_string(),
            "ta".to_string(),
            millis,
        );
    }

    #[test]
    fn append_inserts_newest_first() {
        let mut history = History::new();
        sample(&mut history, "one", "ஒன்று", 1_000);
        sample(&mut history, "two", "இரண்டு", 2_000);
        sample(&mut history, "three", "மூன்று", 3_000);

        let sources: Vec<_> = history.records().iter().map(|r| r.source_text.as_str()).collect();
        assert_eq!(sources, ["three", "two", "one"]);
    }

    #[test]
    fn new_records_are_not_favorites() {
        let mut history = History::new();
        sample(&mut history, "hello", "வணக்கம்", 42);
        let record = &history.records()[0];
        assert!(!record.is_favorite);
        assert_eq!(record.id, "42");
        assert_eq!(record.created_at_millis, 42);
    }

    #[test]
    fn toggle_favorite_flips_exactly_once_per_call() {
        let mut history = History::new();
        sample(&mut history, "hello", "வணக்கம்", 42);

        history.toggle_favorite("42");
        assert!(history.records()[0].is_favorite);
        history.toggle_favorite("42");
        assert!(!history.records()[0].is_favorite);
    }

    #[test]
    fn toggle_favorite_unknown_id_is_a_noop() {
        let mut history = History::new();
        sample(&mut history, "hello", "வணக்கம்", 42);
        let before = history.clone();

        history.toggle_favorite("no-such-id");
        assert_eq!(history, before);
    }

    #[test]
    fn toggle_only_touches_the_matching_record() {
        let mut history = History::new();
        sample(&mut history, "one", "ஒன்று", 1_000);
        sample(&mut history, "two", "இரண்டு", 2_000);

        history.toggle_favorite("1000");
        assert!(!history.records()[0].is_favorite);
        assert!(history.records()[1].is_favorite);
    }
}
