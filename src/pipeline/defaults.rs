use crate::alignment::edit_distance::{align_words, AlignmentStep};
use crate::alignment::tokenization::tokenize;
use crate::error::ScoringError;
use crate::pipeline::traits::{SequenceAligner, Tokenizer};

pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        tokenize(text)
    }
}

pub struct LevenshteinAligner;

impl SequenceAligner for LevenshteinAligner {
    fn align(
        &self,
        reference: &[String],
        submitted: &[String],
    ) -> Result<Vec<AlignmentStep>, ScoringError> {
        Ok(align_words(reference, submitted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_tokenizer_tokenize() {
        let tokenizer = WhitespaceTokenizer;
        assert_eq!(tokenizer.tokenize("Hello,  world!"), ["Hello,", "world!"]);
    }

    #[test]
    fn levenshtein_aligner_align() {
        let aligner = LevenshteinAligner;
        let reference = vec!["a".to_string(), "b".to_string()];
        let submitted = vec!["a".to_string()];
        let steps = aligner.align(&reference, &submitted).unwrap();
        assert_eq!(steps, align_words(&reference, &submitted));
    }
}
