use crate::types::DiffKind;

/// Above this many DP cells the quadratic table is worth a debug note.
const LARGE_TABLE_CELLS: usize = 250_000;

/// Spelling-error threshold as the ratio `NUM / DEN`, compared in integers.
pub const SPELLING_SIMILARITY_NUM: usize = 7;
pub const SPELLING_SIMILARITY_DEN: usize = 10;

/// Minimum similarity for a substitution to be graded as a spelling error.
pub const SPELLING_SIMILARITY_THRESHOLD: f32 =
    SPELLING_SIMILARITY_NUM as f32 / SPELLING_SIMILARITY_DEN as f32;

/// One operation of the word-level edit script, by token index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignmentStep {
    pub kind: DiffKind,
    pub reference_index: Option<usize>,
    pub submitted_index: Option<usize>,
}

impl AlignmentStep {
    fn paired(kind: DiffKind, reference_index: usize, submitted_index: usize) -> Self {
        Self {
            kind,
            reference_index: Some(reference_index),
            submitted_index: Some(submitted_index),
        }
    }

    fn deletion(reference_index: usize) -> Self {
        Self {
            kind: DiffKind::Deletion,
            reference_index: Some(reference_index),
            submitted_index: None,
        }
    }

    fn insertion(submitted_index: usize) -> Self {
        Self {
            kind: DiffKind::Insertion,
            reference_index: None,
            submitted_index: Some(submitted_index),
        }
    }
}

/// Minimum-cost word alignment turning `reference` into `submitted`.
///
/// Unit cost for substitution, deletion and insertion; zero for equal keys.
/// The traceback walks from the bottom-right cell back to the origin and at
/// every cell takes the first applicable move in the order
/// match > substitution > deletion > insertion, so identical inputs always
/// yield the identical script.
pub fn align_words(reference: &[String], submitted: &[String]) -> Vec<AlignmentStep> {
    let rows = reference.len() + 1;
    let cols = submitted.len() + 1;
    let cells = rows * cols;
    if cells >= LARGE_TABLE_CELLS {
        tracing::debug!(
            reference_words = reference.len(),
            submitted_words = submitted.len(),
            cells,
            "edit distance: large alignment table"
        );
    }

    let mut cost = vec![0usize; cells];
    for i in 0..rows {
        cost[i * cols] = i;
    }
    for j in 0..cols {
        cost[j] = j;
    }

    for i in 1..rows {
        let row = i * cols;
        let prev_row = (i - 1) * cols;
        for j in 1..cols {
            let diag = cost[prev_row + j - 1];
            cost[row + j] = if reference[i - 1] == submitted[j - 1] {
                diag
            } else {
                1 + diag.min(cost[prev_row + j]).min(cost[row + j - 1])
            };
        }
    }

    let mut steps = Vec::with_capacity(rows.max(cols));
    let (mut i, mut j) = (reference.len(), submitted.len());
    while i > 0 || j > 0 {
        let here = cost[i * cols + j];
        if i > 0 && j > 0 {
            let diag = cost[(i - 1) * cols + j - 1];
            if reference[i - 1] == submitted[j - 1] && here == diag {
                steps.push(AlignmentStep::paired(DiffKind::Match, i - 1, j - 1));
                i -= 1;
                j -= 1;
                continue;
            }
            if here == diag + 1 {
                steps.push(AlignmentStep::paired(DiffKind::Substitution, i - 1, j - 1));
                i -= 1;
                j -= 1;
                continue;
            }
        }
        if i > 0 && here == cost[(i - 1) * cols + j] + 1 {
            steps.push(AlignmentStep::deletion(i - 1));
            i -= 1;
            continue;
        }
        debug_assert!(j > 0 && here == cost[i * cols + j - 1] + 1);
        steps.push(AlignmentStep::insertion(j - 1));
        j -= 1;
    }
    steps.reverse();
    steps
}

/// Character-level Levenshtein distance.
pub fn levenshtein_chars(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// `1 - distance / longer_length`, in [0, 1]. Two empty words are identical.
pub fn similarity(a: &str, b: &str) -> f32 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - levenshtein_chars(a, b) as f32 / longest as f32
}

/// Integer form of `similarity(a, b) >= SPELLING_SIMILARITY_THRESHOLD`,
/// exact at the boundary.
pub fn is_spelling_error(a: &str, b: &str) -> bool {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return false;
    }
    let shared = longest - levenshtein_chars(a, b);
    SPELLING_SIMILARITY_DEN * shared >= SPELLING_SIMILARITY_NUM * longest
}
