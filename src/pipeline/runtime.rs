use crate::alignment::edit_distance::{is_spelling_error, similarity, AlignmentStep};
use crate::alignment::tokenization::normalize_tokens;
use crate::config::{ScoringConfig, WpmBasis};
use crate::error::ScoringError;
use crate::pipeline::builder::ScoringEngineBuilder;
use crate::pipeline::traits::{SequenceAligner, Tokenizer};
use crate::types::{DiffEntry, DiffKind, ScoreResult};

pub struct ScoringEngine {
    config: ScoringConfig,
    tokenizer: Box<dyn Tokenizer>,
    sequence_aligner: Box<dyn SequenceAligner>,
}

pub(crate) struct ScoringEngineParts {
    pub config: ScoringConfig,
    pub tokenizer: Box<dyn Tokenizer>,
    pub sequence_aligner: Box<dyn SequenceAligner>,
}

impl ScoringEngine {
    pub(crate) fn from_parts(parts: ScoringEngineParts) -> Self {
        Self {
            config: parts.config,
            tokenizer: parts.tokenizer,
            sequence_aligner: parts.sequence_aligner,
        }
    }

    /// Engine with the default whitespace tokenizer and Levenshtein aligner.
    pub fn new(config: ScoringConfig) -> Self {
        ScoringEngineBuilder::new(config).build()
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.tokenizer.tokenize(text)
    }

    /// Tokenize both texts with the engine's tokenizer, then [`Self::score`].
    pub fn score_text(
        &self,
        reference_text: &str,
        submitted_text: &str,
        elapsed_seconds: f64,
    ) -> Result<ScoreResult, ScoringError> {
        let reference = self.tokenize(reference_text);
        let submitted = self.tokenize(submitted_text);
        self.score(&reference, &submitted, elapsed_seconds)
    }

    pub fn score<R, S>(
        &self,
        reference: &[R],
        submitted: &[S],
        elapsed_seconds: f64,
    ) -> Result<ScoreResult, ScoringError>
    where
        R: AsRef<str>,
        S: AsRef<str>,
    {
        if reference.is_empty() {
            return Err(ScoringError::invalid_input("reference text has no words"));
        }
        if !elapsed_seconds.is_finite() || elapsed_seconds < 0.0 {
            return Err(ScoringError::invalid_input(format!(
                "elapsed time must be a non-negative number of seconds, got {elapsed_seconds}"
            )));
        }

        let reference_keys = normalize_tokens(reference, &self.config);
        let submitted_keys = normalize_tokens(submitted, &self.config);
        let steps = self
            .sequence_aligner
            .align(&reference_keys, &submitted_keys)?;
        check_script(&steps, &reference_keys, &submitted_keys)?;

        let diff_entries: Vec<DiffEntry> = steps
            .iter()
            .map(|step| {
                to_diff_entry(step, reference, submitted, &reference_keys, &submitted_keys)
            })
            .collect();

        let matches = diff_entries
            .iter()
            .filter(|entry| entry.kind == DiffKind::Match)
            .count();
        let accuracy = matches as f64 * 100.0 / reference.len() as f64;

        let word_count = match self.config.wpm_basis {
            WpmBasis::Reference => reference.len(),
            WpmBasis::Submitted => submitted.len(),
        };
        let wpm = words_per_minute(word_count, submitted.is_empty(), elapsed_seconds);

        tracing::debug!(
            reference_words = reference.len(),
            submitted_words = submitted.len(),
            matches,
            edits = diff_entries.len() - matches,
            accuracy = format!("{accuracy:.2}"),
            wpm = format!("{wpm:.2}"),
            "scoring: attempt graded"
        );

        Ok(ScoreResult {
            accuracy,
            wpm,
            reference_word_count: reference.len(),
            submitted_word_count: submitted.len(),
            diff_entries,
        })
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

/// Score with the default tokenizer and aligner.
pub fn score<R, S>(
    reference: &[R],
    submitted: &[S],
    elapsed_seconds: f64,
    config: &ScoringConfig,
) -> Result<ScoreResult, ScoringError>
where
    R: AsRef<str>,
    S: AsRef<str>,
{
    ScoringEngine::new(*config).score(reference, submitted, elapsed_seconds)
}

/// Whitespace-tokenize both texts and score them with the default aligner.
pub fn score_text(
    reference_text: &str,
    submitted_text: &str,
    elapsed_seconds: f64,
    config: &ScoringConfig,
) -> Result<ScoreResult, ScoringError> {
    ScoringEngine::new(*config).score_text(reference_text, submitted_text, elapsed_seconds)
}

/// Words per minute, saturating at `f64::MAX` when a tiny positive elapsed
/// time overflows the division.
fn words_per_minute(word_count: usize, submitted_is_empty: bool, elapsed_seconds: f64) -> f64 {
    if elapsed_seconds == 0.0 || submitted_is_empty {
        return 0.0;
    }
    let wpm = word_count as f64 * 60.0 / elapsed_seconds;
    if wpm.is_finite() {
        wpm
    } else {
        f64::MAX
    }
}

fn to_diff_entry<R, S>(
    step: &AlignmentStep,
    reference: &[R],
    submitted: &[S],
    reference_keys: &[String],
    submitted_keys: &[String],
) -> DiffEntry
where
    R: AsRef<str>,
    S: AsRef<str>,
{
    let (similarity, spelling_error) = match (step.kind, step.reference_index, step.submitted_index)
    {
        (DiffKind::Substitution, Some(r), Some(s)) => {
            let expected = &reference_keys[r];
            let typed = &submitted_keys[s];
            (
                Some(similarity(expected, typed)),
                is_spelling_error(expected, typed),
            )
        }
        _ => (None, false),
    };

    DiffEntry {
        kind: step.kind,
        reference_word: step
            .reference_index
            .map(|idx| reference[idx].as_ref().to_string()),
        submitted_word: step
            .submitted_index
            .map(|idx| submitted[idx].as_ref().to_string()),
        reference_index: step.reference_index,
        submitted_index: step.submitted_index,
        similarity,
        spelling_error,
    }
}

/// Verify an edit script replays both sequences exactly.
fn check_script(
    steps: &[AlignmentStep],
    reference_keys: &[String],
    submitted_keys: &[String],
) -> Result<(), ScoringError> {
    let mut next_reference = 0usize;
    let mut next_submitted = 0usize;

    for (position, step) in steps.iter().enumerate() {
        let expects_reference = step.kind != DiffKind::Insertion;
        let expects_submitted = step.kind != DiffKind::Deletion;
        if step.reference_index.is_some() != expects_reference
            || step.submitted_index.is_some() != expects_submitted
        {
            return Err(invalid_script(position, "indices do not fit the step kind"));
        }
        if let Some(r) = step.reference_index {
            if r != next_reference || r >= reference_keys.len() {
                return Err(invalid_script(position, "reference index out of order"));
            }
            next_reference += 1;
        }
        if let Some(s) = step.submitted_index {
            if s != next_submitted || s >= submitted_keys.len() {
                return Err(invalid_script(position, "submitted index out of order"));
            }
            next_submitted += 1;
        }
        if let (DiffKind::Match, Some(r), Some(s)) =
            (step.kind, step.reference_index, step.submitted_index)
        {
            if reference_keys[r] != submitted_keys[s] {
                return Err(invalid_script(position, "match between different words"));
            }
        }
    }

    if next_reference != reference_keys.len() || next_submitted != submitted_keys.len() {
        return Err(ScoringError::invalid_input(format!(
            "aligner script covers {next_reference}/{} reference and {next_submitted}/{} submitted words",
            reference_keys.len(),
            submitted_keys.len()
        )));
    }
    Ok(())
}

fn invalid_script(position: usize, reason: &str) -> ScoringError {
    ScoringError::invalid_input(format!("aligner step {position}: {reason}"))
}
