//! The translation pipeline state machine.
//!
//! [`Pipeline`] owns the transient session state (current input, language
//! pair, recording/translating flags) and turns typed [`PipelineEvent`]s
//! into [`Effect`]s for the caller to execute. It performs no IO itself:
//! timers, fetch, speech engines and the history store are all driven by
//! whoever dispatches events, which keeps the whole policy natively
//! testable.

use crate::api::TranslateError;

/// Quiet period before an auto-translation fires.
pub const DEBOUNCE_MILLIS: u32 = 1_000;

/// Inputs to the pipeline: user intents, timer fires and adapter callbacks.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    /// The user edited the input text directly.
    TextChanged { text: String },
    /// The capture adapter produced a new running transcript. Ignored when
    /// not recording, so a stopped session cannot leak text in.
    TranscriptUpdated { text: String },
    /// Explicit translate request; bypasses the debounce.
    Submit,
    DebounceFired,
    /// A translation round-trip completed. Echoes back what was requested so
    /// the resulting record is built from the text that was actually sent,
    /// not whatever the input holds by now.
    TranslationFinished {
        seq: u64,
        source_text: String,
        source_language: String,
        target_language: String,
        outcome: Result<String, TranslateError>,
    },
    /// The capture adapter started successfully.
    RecordingStarted,
    /// The user asked to stop recording.
    RecordingStopped,
    /// The engine ended on its own (silence timeout, or after a stop).
    RecognitionEnded,
    RecognitionFailed { code: String },
    SourceLanguageChanged { code: String },
    TargetLanguageChanged { code: String },
    AutoTranslateToggled { enabled: bool },
}

/// Side effects requested by the pipeline, executed by the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// (Re)arm the single debounce timer; arming cancels any pending one.
    ScheduleDebounce,
    CancelDebounce,
    BeginTranslation {
        seq: u64,
        text: String,
        source_language: String,
        target_language: String,
    },
    AppendRecord {
        source_text: String,
        source_language: String,
        target_text: String,
        target_language: String,
    },
    Speak { text: String, language: String },
    StopRecognition,
    ReportError { message: String },
}

#[derive(Debug, Clone)]
pub struct Pipeline {
    pub input_text: String,
    pub source_language: String,
    pub target_language: String,
    pub is_recording: bool,
    pub is_translating: bool,
    pub auto_translate: bool,
    next_seq: u64,
    in_flight: Option<u64>,
}

impl Pipeline {
    pub fn new(source_language: String, target_language: String) -> Self {
        Self {
            input_text: String::new(),
            source_language,
            target_language,
            is_recording: false,
            is_translating: false,
            auto_translate: true,
            next_seq: 0,
            in_flight: None,
        }
    }

    pub fn handle(&mut self, event: PipelineEvent) -> Vec<Effect> {
        match event {
            PipelineEvent::TextChanged { text } => self.text_changed(text),
            PipelineEvent::TranscriptUpdated { text } => {
                if self.is_recording {
                    self.text_changed(text)
                } else {
                    Vec::new()
                }
            }
            PipelineEvent::Submit | PipelineEvent::DebounceFired => self.begin_translation(),
            PipelineEvent::TranslationFinished {
                seq,
                source_text,
                source_language,
                target_language,
                outcome,
            } => self.translation_finished(seq, source_text, source_language, target_language, outcome),
            PipelineEvent::RecordingStarted => {
                self.is_recording = true;
                Vec::new()
            }
            PipelineEvent::RecordingStopped => {
                if self.is_recording {
                    self.is_recording = false;
                    vec![Effect::StopRecognition]
                } else {
                    Vec::new()
                }
            }
            PipelineEvent::RecognitionEnded => self.recognition_ended(),
            PipelineEvent::RecognitionFailed { code } => {
                self.is_recording = false;
                vec![Effect::ReportError {
                    message: format!("Speech recognition error: {code}"),
                }]
            }
            PipelineEvent::SourceLanguageChanged { code } => {
                let mut effects = Vec::new();
                // The engine cannot switch language mid-session.
                if self.is_recording {
                    self.is_recording = false;
                    effects.push(Effect::StopRecognition);
                }
                self.source_language = code;
                effects
            }
            PipelineEvent::TargetLanguageChanged { code } => {
                self.target_language = code;
                Vec::new()
            }
            PipelineEvent::AutoTranslateToggled { enabled } => {
                self.auto_translate = enabled;
                if enabled {
                    Vec::new()
                } else {
                    vec![Effect::CancelDebounce]
                }
            }
        }
    }

    fn blank(&self) -> bool {
        self.input_text.trim().is_empty()
    }

    fn text_changed(&mut self, text: String) -> Vec<Effect> {
        self.input_text = text;
        if self.auto_translate && !self.blank() {
            vec![Effect::ScheduleDebounce]
        } else {
            Vec::new()
        }
    }

    /// At most one request in flight; a fire while busy or with blank input
    /// is dropped rather than queued.
    fn begin_translation(&mut self) -> Vec<Effect> {
        if self.blank() || self.is_translating {
            return Vec::new();
        }
        self.is_translating = true;
        self.next_seq += 1;
        self.in_flight = Some(self.next_seq);
        vec![Effect::BeginTranslation {
            seq: self.next_seq,
            text: self.input_text.clone(),
            source_language: self.source_language.clone(),
            target_language: self.target_language.clone(),
        }]
    }

    fn translation_finished(
        &mut self,
        seq: u64,
        source_text: String,
        source_language: String,
        target_language: String,
        outcome: Result<String, TranslateError>,
    ) -> Vec<Effect> {
        self.is_translating = false;
        // A superseded request's result is discarded, never applied stale.
        if self.in_flight != Some(seq) {
            return Vec::new();
        }
        self.in_flight = None;

        match outcome {
            Ok(target_text) => {
                let effects = vec![
                    Effect::AppendRecord {
                        source_text,
                        source_language,
                        target_text: target_text.clone(),
                        target_language: target_language.clone(),
                    },
                    Effect::Speak {
                        text: target_text,
                        language: target_language,
                    },
                ];
                if !self.is_recording {
                    self.input_text.clear();
                }
                effects
            }
            // Failures go to the error channel only; the message is never
            // spoken or recorded as if it were a translation.
            Err(error) => vec![Effect::ReportError {
                message: error.to_string(),
            }],
        }
    }

    fn recognition_ended(&mut self) -> Vec<Effect> {
        // An end event for a session we already left (explicit stop,
        // language change, error) carries no effects.
        if !self.is_recording {
            return Vec::new();
        }
        self.is_recording = false;
        if self.auto_translate && !self.blank() {
            let mut effects = vec![Effect::CancelDebounce];
            effects.extend(self.begin_translation());
            effects
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline() -> Pipeline {
        Pipeline::new("en".to_string(), "ta".to_string())
    }

    fn begin_translations(effects: &[Effect]) -> Vec<&Effect> {
        effects
            .iter()
            .filter(|effect| matches!(effect, Effect::BeginTranslation { .. }))
            .collect()
    }

    #[test]
    fn bursts_of_edits_coalesce_into_one_request() {
        let mut pipeline = pipeline();
        let mut fired = Vec::new();
        for text in ["h", "he", "hel", "hell", "hello"] {
            fired.extend(pipeline.handle(PipelineEvent::TextChanged { text: text.to_string() }));
        }
        // Every edit only rearms the timer; nothing translates yet.
        assert!(begin_translations(&fired).is_empty());
        assert_eq!(fired.iter().filter(|e| **e == Effect::ScheduleDebounce).count(), 5);

        let effects = pipeline.handle(PipelineEvent::DebounceFired);
        assert_eq!(begin_translations(&effects).len(), 1);
    }

    #[test]
    fn blank_input_never_translates() {
        let mut pipeline = pipeline();
        assert!(pipeline.handle(PipelineEvent::TextChanged { text: "   ".to_string() }).is_empty());
        assert!(pipeline.handle(PipelineEvent::Submit).is_empty());
        assert!(pipeline.handle(PipelineEvent::DebounceFired).is_empty());
    }

    #[test]
    fn auto_translate_off_disables_the_debounce() {
        let mut pipeline = pipeline();
        let effects = pipeline.handle(PipelineEvent::AutoTranslateToggled { enabled: false });
        assert_eq!(effects, vec![Effect::CancelDebounce]);

        let effects = pipeline.handle(PipelineEvent::TextChanged { text: "hello".to_string() });
        assert!(effects.is_empty());

        // Explicit submit still works.
        let effects = pipeline.handle(PipelineEvent::Submit);
        assert_eq!(begin_translations(&effects).len(), 1);
    }

    #[test]
    fn successful_translation_appends_speaks_and_clears_input() {
        let mut pipeline = pipeline();
        pipeline.handle(PipelineEvent::TextChanged { text: "hello".to_string() });
        let effects = pipeline.handle(PipelineEvent::Submit);
        let Effect::BeginTranslation { seq, text, source_language, target_language } = effects[0].clone() else {
            panic!("expected BeginTranslation, got {effects:?}");
        };
        assert_eq!(text, "hello");
        assert!(pipeline.is_translating);

        let effects = pipeline.handle(PipelineEvent::TranslationFinished {
            seq,
            source_text: text,
            source_language,
            target_language,
            outcome: Ok("வணக்கம்".to_string()),
        });
        assert_eq!(
            effects,
            vec![
                Effect::AppendRecord {
                    source_text: "hello".to_string(),
                    source_language: "en".to_string(),
                    target_text: "வணக்கம்".to_string(),
                    target_language: "ta".to_string(),
                },
                Effect::Speak {
                    text: "வணக்கம்".to_string(),
                    language: "ta".to_string(),
                },
            ]
        );
        assert!(!pipeline.is_translating);
        assert_eq!(pipeline.input_text, "");
    }

    #[test]
    fn success_record_lands_in_history_unfavorited() {
        use crate::history::History;

        let mut pipeline = pipeline();
        pipeline.handle(PipelineEvent::TextChanged { text: "hello".to_string() });
        let effects = pipeline.handle(PipelineEvent::Submit);
        let Effect::BeginTranslation { seq, text, source_language, target_language } = effects[0].clone() else {
            panic!("expected BeginTranslation");
        };

        let mut history = History::new();
        for effect in pipeline.handle(PipelineEvent::TranslationFinished {
            seq,
            source_text: text,
            source_language,
            target_language,
            outcome: Ok("வணக்கம்".to_string()),
        }) {
            if let Effect::AppendRecord { source_text, source_language, target_text, target_language } = effect {
                history.append_new(source_text, source_language, target_text, target_language, 1_234);
            }
        }

        assert_eq!(history.records().len(), 1);
        let record = &history.records()[0];
        assert_eq!(record.source_text, "hello");
        assert_eq!(record.target_text, "வணக்கம்");
        assert!(!record.is_favorite);
    }

    #[test]
    fn failed_translation_is_reported_not_spoken() {
        let mut pipeline = pipeline();
        pipeline.handle(PipelineEvent::TextChanged { text: "hello".to_string() });
        let effects = pipeline.handle(PipelineEvent::Submit);
        let Effect::BeginTranslation { seq, text, source_language, target_language } = effects[0].clone() else {
            panic!("expected BeginTranslation");
        };

        let effects = pipeline.handle(PipelineEvent::TranslationFinished {
            seq,
            source_text: text,
            source_language,
            target_language,
            outcome: Err(TranslateError::Rejected("Translation failed".to_string())),
        });
        assert_eq!(
            effects,
            vec![Effect::ReportError { message: "Translation failed".to_string() }]
        );
        assert!(!pipeline.is_translating);
        // The failed text stays in the input for the user to retry.
        assert_eq!(pipeline.input_text, "hello");
    }

    #[test]
    fn a_request_already_in_flight_gates_new_ones() {
        let mut pipeline = pipeline();
        pipeline.handle(PipelineEvent::TextChanged { text: "hello".to_string() });
        assert_eq!(begin_translations(&pipeline.handle(PipelineEvent::Submit)).len(), 1);
        assert!(pipeline.handle(PipelineEvent::Submit).is_empty());
        assert!(pipeline.handle(PipelineEvent::DebounceFired).is_empty());
    }

    #[test]
    fn stale_results_are_discarded() {
        let mut pipeline = pipeline();
        pipeline.handle(PipelineEvent::TextChanged { text: "hello".to_string() });
        let effects = pipeline.handle(PipelineEvent::Submit);
        let Effect::BeginTranslation { seq, .. } = effects[0] else {
            panic!("expected BeginTranslation");
        };

        let effects = pipeline.handle(PipelineEvent::TranslationFinished {
            seq: seq + 7,
            source_text: "old".to_string(),
            source_language: "en".to_string(),
            target_language: "ta".to_string(),
            outcome: Ok("stale".to_string()),
        });
        assert!(effects.is_empty());
        assert!(!pipeline.is_translating);
    }

    #[test]
    fn natural_end_of_recognition_translates_immediately() {
        let mut pipeline = pipeline();
        pipeline.handle(PipelineEvent::RecordingStarted);
        pipeline.handle(PipelineEvent::TranscriptUpdated { text: "hello there".to_string() });

        let effects = pipeline.handle(PipelineEvent::RecognitionEnded);
        assert!(!pipeline.is_recording);
        // Debounce is bypassed: the request fires in the same turn, and any
        // pending timer is cancelled so it cannot fire a duplicate.
        assert_eq!(effects[0], Effect::CancelDebounce);
        assert_eq!(begin_translations(&effects).len(), 1);
    }

    #[test]
    fn explicit_stop_does_not_translate() {
        let mut pipeline = pipeline();
        pipeline.handle(PipelineEvent::RecordingStarted);
        pipeline.handle(PipelineEvent::TranscriptUpdated { text: "hello".to_string() });

        let effects = pipeline.handle(PipelineEvent::RecordingStopped);
        assert_eq!(effects, vec![Effect::StopRecognition]);
        // The engine's end event then arrives for a session already left.
        assert!(pipeline.handle(PipelineEvent::RecognitionEnded).is_empty());
    }

    #[test]
    fn input_is_kept_when_translation_lands_mid_recording() {
        let mut pipeline = pipeline();
        pipeline.handle(PipelineEvent::RecordingStarted);
        pipeline.handle(PipelineEvent::TranscriptUpdated { text: "hello".to_string() });
        let effects = pipeline.handle(PipelineEvent::Submit);
        let Effect::BeginTranslation { seq, text, source_language, target_language } = effects[0].clone() else {
            panic!("expected BeginTranslation");
        };

        pipeline.handle(PipelineEvent::TranslationFinished {
            seq,
            source_text: text,
            source_language,
            target_language,
            outcome: Ok("வணக்கம்".to_string()),
        });
        assert_eq!(pipeline.input_text, "hello");
    }

    #[test]
    fn source_language_change_while_recording_stops_the_session_first() {
        let mut pipeline = pipeline();
        pipeline.handle(PipelineEvent::RecordingStarted);

        let effects = pipeline.handle(PipelineEvent::SourceLanguageChanged { code: "hi".to_string() });
        assert_eq!(effects, vec![Effect::StopRecognition]);
        assert!(!pipeline.is_recording);
        assert_eq!(pipeline.source_language, "hi");

        // Nothing from the dead session leaks through afterwards.
        assert!(pipeline.handle(PipelineEvent::TranscriptUpdated { text: "residual".to_string() }).is_empty());
        assert_ne!(pipeline.input_text, "residual");
        assert!(pipeline.handle(PipelineEvent::RecognitionEnded).is_empty());
    }

    #[test]
    fn recognition_error_reports_and_ends_listening() {
        let mut pipeline = pipeline();
        pipeline.handle(PipelineEvent::RecordingStarted);

        let effects = pipeline.handle(PipelineEvent::RecognitionFailed { code: "not-allowed".to_string() });
        assert!(!pipeline.is_recording);
        assert_eq!(
            effects,
            vec![Effect::ReportError { message: "Speech recognition error: not-allowed".to_string() }]
        );
        // The error's trailing end event is inert.
        assert!(pipeline.handle(PipelineEvent::RecognitionEnded).is_empty());
    }

    #[test]
    fn transcript_updates_while_not_recording_are_ignored() {
        let mut pipeline = pipeline();
        assert!(pipeline.handle(PipelineEvent::TranscriptUpdated { text: "ghost".to_string() }).is_empty());
        assert_eq!(pipeline.input_text, "");
    }

    #[test]
    fn target_language_change_applies_to_the_next_request() {
        let mut pipeline = pipeline();
        pipeline.handle(PipelineEvent::TargetLanguageChanged { code: "hi".to_string() });
        pipeline.handle(PipelineEvent::TextChanged { text: "hello".to_string() });
        let effects = pipeline.handle(PipelineEvent::Submit);
        let Effect::BeginTranslation { target_language, .. } = &effects[0] else {
            panic!("expected BeginTranslation");
        };
        assert_eq!(target_language, "hi");
    }
}
