/// Accumulates recognition results into one running transcript.
///
/// The engine reports results as an indexed list where entries from the
/// event's result index onward may be rewritten as interim hypotheses firm
/// up. Each index keeps only its latest text (last writer wins) and the
/// transcript is the concatenation in index order, with no de-duplication
/// against earlier final segments.
#[derive(Debug, Clone, Default)]
pub struct TranscriptAssembler {
    segments: Vec<String>,
}

impl TranscriptAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_segment(&mut self, index: usize, text: String) {
        if index >= self.segments.len() {
            self.segments.resize(index + 1, String::new());
        }
        self.segments[index] = text;
    }

    pub fn transcript(&self) -> String {
        self.segments.concat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concatenates_in_index_order() {
        let mut assembler = TranscriptAssembler::new();
        assembler.set_segment(0, "hello ".to_string());
        assembler.set_segment(1, "world".to_string());
        assert_eq!(assembler.transcript(), "hello world");
    }

    #[test]
    fn interim_rewrites_are_last_writer_wins() {
        let mut assembler = TranscriptAssembler::new();
        assembler.set_segment(0, "helo".to_string());
        assembler.set_segment(0, "hello".to_string());
        assembler.set_segment(1, "wor".to_string());
        assembler.set_segment(1, "world".to_string());
        assert_eq!(assembler.transcript(), "helloworld");
    }

    #[test]
    fn gaps_before_an_index_stay_empty() {
        let mut assembler = TranscriptAssembler::new();
        assembler.set_segment(2, "tail".to_string());
        assert_eq!(assembler.transcript(), "tail");
        assembler.set_segment(0, "head ".to_string());
        assert_eq!(assembler.transcript(), "head tail");
    }
}
