use serde::Serialize;

use crate::alignment::tokenization::fold_quotes;

const MARK_COUNT: usize = 10;

/// Marks compared between reference and submitted text, in report order.
pub const TRACKED_MARKS: [char; MARK_COUNT] = [',', '.', '!', '?', ';', ':', '"', '\'', '(', ')'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PunctuationDiscrepancy {
    Missing { mark: char, count: usize },
    Extra { mark: char, count: usize },
}

impl PunctuationDiscrepancy {
    pub fn mark(&self) -> char {
        match *self {
            Self::Missing { mark, .. } | Self::Extra { mark, .. } => mark,
        }
    }

    pub fn count(&self) -> usize {
        match *self {
            Self::Missing { count, .. } | Self::Extra { count, .. } => count,
        }
    }
}

/// Compare how often each tracked mark occurs in the two raw texts.
///
/// Positions are ignored: a comma typed after the wrong word still counts.
/// Word accuracy is unaffected by this analysis.
pub fn analyze_punctuation(
    reference_text: &str,
    submitted_text: &str,
) -> Vec<PunctuationDiscrepancy> {
    let reference_counts = mark_counts(reference_text);
    let submitted_counts = mark_counts(submitted_text);

    TRACKED_MARKS
        .iter()
        .zip(reference_counts.iter().zip(submitted_counts.iter()))
        .filter_map(|(&mark, (&expected, &typed))| {
            if expected > typed {
                Some(PunctuationDiscrepancy::Missing {
                    mark,
                    count: expected - typed,
                })
            } else if typed > expected {
                Some(PunctuationDiscrepancy::Extra {
                    mark,
                    count: typed - expected,
                })
            } else {
                None
            }
        })
        .collect()
}

fn mark_counts(text: &str) -> [usize; MARK_COUNT] {
    let mut counts = [0usize; MARK_COUNT];
    for c in text.chars().map(fold_quotes) {
        if let Some(slot) = TRACKED_MARKS.iter().position(|&mark| mark == c) {
            counts[slot] += 1;
        }
    }
    counts
}
