use crate::alignment::edit_distance::AlignmentStep;
use crate::error::ScoringError;

pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Produces the word edit script over already-normalized comparison keys.
///
/// The returned steps must consume every reference and submitted index
/// exactly once, in increasing order, and may only mark equal keys as a
/// match. The engine rejects scripts that break this.
pub trait SequenceAligner: Send + Sync {
    fn align(
        &self,
        reference: &[String],
        submitted: &[String],
    ) -> Result<Vec<AlignmentStep>, ScoringError>;
}
