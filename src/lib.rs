pub mod alignment;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

pub use alignment::edit_distance::{
    AlignmentStep, SPELLING_SIMILARITY_DEN, SPELLING_SIMILARITY_NUM, SPELLING_SIMILARITY_THRESHOLD,
};
pub use alignment::punctuation::{analyze_punctuation, PunctuationDiscrepancy};
pub use config::{ScoringConfig, WpmBasis};
pub use error::ScoringError;
pub use pipeline::builder::ScoringEngineBuilder;
pub use pipeline::runtime::{score, score_text, ScoringEngine};
pub use pipeline::traits::{SequenceAligner, Tokenizer};
pub use types::{DiffCounts, DiffEntry, DiffKind, ScoreResult};
