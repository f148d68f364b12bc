use crate::config::ScoringConfig;
use crate::pipeline::defaults::{LevenshteinAligner, WhitespaceTokenizer};
use crate::pipeline::runtime::{ScoringEngine, ScoringEngineParts};
use crate::pipeline::traits::{SequenceAligner, Tokenizer};

pub struct ScoringEngineBuilder {
    config: ScoringConfig,
    tokenizer: Option<Box<dyn Tokenizer>>,
    sequence_aligner: Option<Box<dyn SequenceAligner>>,
}

impl ScoringEngineBuilder {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            config,
            tokenizer: None,
            sequence_aligner: None,
        }
    }

    pub fn with_tokenizer(mut self, tokenizer: Box<dyn Tokenizer>) -> Self {
        self.tokenizer = Some(tokenizer);
        self
    }

    pub fn with_sequence_aligner(mut self, sequence_aligner: Box<dyn SequenceAligner>) -> Self {
        self.sequence_aligner = Some(sequence_aligner);
        self
    }

    pub fn build(self) -> ScoringEngine {
        ScoringEngine::from_parts(ScoringEngineParts {
            config: self.config,
            tokenizer: self
                .tokenizer
                .unwrap_or_else(|| Box::new(WhitespaceTokenizer)),
            sequence_aligner: self
                .sequence_aligner
                .unwrap_or_else(|| Box::new(LevenshteinAligner)),
        })
    }
}
