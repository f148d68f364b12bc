use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    Match,
    Substitution,
    Deletion,
    Insertion,
}

/// One step of the word alignment between reference and submitted text.
///
/// Words are the original tokens as received, with case and punctuation
/// intact. A deletion has no submitted side, an insertion has no reference
/// side; match and substitution carry both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffEntry {
    pub kind: DiffKind,
    pub reference_word: Option<String>,
    pub submitted_word: Option<String>,
    pub reference_index: Option<usize>,
    pub submitted_index: Option<usize>,
    /// Character-level similarity in [0, 1] of the normalized words.
    /// Only set for substitutions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f32>,
    /// Substitution close enough to the reference word to count as a typo.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub spelling_error: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DiffCounts {
    pub matches: usize,
    pub substitutions: usize,
    pub deletions: usize,
    pub insertions: usize,
    pub spelling_errors: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    /// Percentage in [0, 100] of reference words matched by the alignment.
    pub accuracy: f64,
    pub wpm: f64,
    pub reference_word_count: usize,
    pub submitted_word_count: usize,
    pub diff_entries: Vec<DiffEntry>,
}

impl ScoreResult {
    pub fn counts(&self) -> DiffCounts {
        let mut counts = DiffCounts::default();
        for entry in &self.diff_entries {
            match entry.kind {
                DiffKind::Match => counts.matches += 1,
                DiffKind::Substitution => {
                    counts.substitutions += 1;
                    if entry.spelling_error {
                        counts.spelling_errors += 1;
                    }
                }
                DiffKind::Deletion => counts.deletions += 1,
                DiffKind::Insertion => counts.insertions += 1,
            }
        }
        counts
    }

    pub fn words_correct(&self) -> usize {
        self.counts().matches
    }

    /// Wrong, missing and extra words together.
    pub fn words_wrong(&self) -> usize {
        self.edit_distance()
    }

    pub fn edit_distance(&self) -> usize {
        let counts = self.counts();
        counts.substitutions + counts.deletions + counts.insertions
    }

    /// Edit distance over reference length. Unlike accuracy this can exceed 1
    /// when the submission carries many extra words.
    pub fn word_error_rate(&self) -> f64 {
        if self.reference_word_count == 0 {
            return 0.0;
        }
        self.edit_distance() as f64 / self.reference_word_count as f64
    }

    /// Submitted side of the alignment, in order.
    pub fn submitted_tokens(&self) -> Vec<&str> {
        self.diff_entries
            .iter()
            .filter_map(|entry| entry.submitted_word.as_deref())
            .collect()
    }

    /// Reference side of the alignment, in order.
    pub fn reference_tokens(&self) -> Vec<&str> {
        self.diff_entries
            .iter()
            .filter_map(|entry| entry.reference_word.as_deref())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(kind: DiffKind, reference: Option<&str>, submitted: Option<&str>) -> DiffEntry {
        DiffEntry {
            kind,
            reference_word: reference.map(str::to_string),
            submitted_word: submitted.map(str::to_string),
            reference_index: None,
            submitted_index: None,
            similarity: None,
            spelling_error: false,
        }
    }

    fn sample() -> ScoreResult {
        let mut typo = entry(DiffKind::Substitution, Some("brown"), Some("brwn"));
        typo.spelling_error = true;
        ScoreResult {
            accuracy: 50.0,
            wpm: 0.0,
            reference_word_count: 4,
            submitted_word_count: 4,
            diff_entries: vec![
                entry(DiffKind::Match, Some("the"), Some("the")),
                entry(DiffKind::Deletion, Some("quick"), None),
                typo,
                entry(DiffKind::Insertion, None, Some("red")),
                entry(DiffKind::Match, Some("fox"), Some("fox")),
            ],
        }
    }

    #[test]
    fn counts_tally_each_kind() {
        let counts = sample().counts();
        assert_eq!(
            counts,
            DiffCounts {
                matches: 2,
                substitutions: 1,
                deletions: 1,
                insertions: 1,
                spelling_errors: 1,
            }
        );
    }

    #[test]
    fn words_wrong_and_error_rate() {
        let result = sample();
        assert_eq!(result.words_correct(), 2);
        assert_eq!(result.words_wrong(), 3);
        assert!((result.word_error_rate() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn token_sides_skip_missing_words() {
        let result = sample();
        assert_eq!(result.reference_tokens(), ["the", "quick", "brown", "fox"]);
        assert_eq!(result.submitted_tokens(), ["the", "brwn", "red", "fox"]);
    }

    #[test]
    fn diff_kind_serializes_lowercase() {
        let json = serde_json::to_string(&DiffKind::Substitution).expect("serialize");
        assert_eq!(json, "\"substitution\"");
    }

    #[test]
    fn plain_entries_omit_similarity_fields() {
        let json = serde_json::to_value(entry(DiffKind::Match, Some("a"), Some("a")))
            .expect("serialize");
        assert!(json.get("similarity").is_none());
        assert!(json.get("spelling_error").is_none());
    }
}
