use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use dictation_scoring::{score_text, DiffKind, ScoringConfig};
use libtest_mimic::{Arguments, Failed, Trial};
use serde::Deserialize;

const SUITE_NAME: &str = "scoring_matches_reference_cases";
const TOLERANCE: f64 = 1e-9;

#[derive(Debug, Deserialize)]
struct ReferenceCase {
    id: String,
    reference: String,
    submitted: String,
    elapsed_seconds: f64,
    #[serde(default)]
    config: Option<ScoringConfig>,
    #[serde(default)]
    expected: Option<ExpectedScore>,
    #[serde(default)]
    expect_invalid_input: bool,
}

#[derive(Debug, Deserialize)]
struct ExpectedScore {
    accuracy: f64,
    wpm: f64,
    kinds: Vec<DiffKindLabel>,
    #[serde(default)]
    spelling_errors: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum DiffKindLabel {
    Match,
    Substitution,
    Deletion,
    Insertion,
}

impl From<DiffKind> for DiffKindLabel {
    fn from(kind: DiffKind) -> Self {
        match kind {
            DiffKind::Match => Self::Match,
            DiffKind::Substitution => Self::Substitution,
            DiffKind::Deletion => Self::Deletion,
            DiffKind::Insertion => Self::Insertion,
        }
    }
}

fn main() {
    let args = Arguments::from_args();
    let repo_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let fixture = repo_root.join("test-data/scoring/reference_cases.json");

    let cases = match load_cases(&fixture) {
        Ok(cases) => cases,
        Err(err) => {
            run_setup_failure(&args, err);
            return;
        }
    };
    if cases.is_empty() {
        run_setup_failure(
            &args,
            "No reference cases found under test-data/scoring.".to_string(),
        );
        return;
    }

    let tests = cases
        .into_iter()
        .map(|case| {
            let test_name = format!("{SUITE_NAME}::case::{}", case.id);
            Trial::test(test_name, move || run_reference_case(&case).map_err(Failed::from))
        })
        .collect();

    libtest_mimic::run(&args, tests).exit();
}

fn run_setup_failure(args: &Arguments, message: String) {
    let test = Trial::test(format!("{SUITE_NAME}::setup"), move || {
        Err(Failed::from(message))
    });
    libtest_mimic::run(args, vec![test]).exit();
}

fn run_reference_case(case: &ReferenceCase) -> Result<(), String> {
    let config = case.config.unwrap_or_default();
    let outcome = score_text(&case.reference, &case.submitted, case.elapsed_seconds, &config);

    if case.expect_invalid_input {
        return match outcome {
            Err(err) if err.is_invalid_input() => Ok(()),
            Err(err) => Err(format!("{}: expected invalid input, got '{err}'", case.id)),
            Ok(result) => Err(format!(
                "{}: expected invalid input, got accuracy={}",
                case.id, result.accuracy
            )),
        };
    }

    let expected = case
        .expected
        .as_ref()
        .ok_or_else(|| format!("{}: fixture has no expected score", case.id))?;
    let result = outcome.map_err(|err| format!("{}: score_text() failed: {err}", case.id))?;

    if (result.accuracy - expected.accuracy).abs() > TOLERANCE {
        return Err(format!(
            "{}: accuracy mismatch (expected {}, got {})",
            case.id, expected.accuracy, result.accuracy
        ));
    }
    if (result.wpm - expected.wpm).abs() > TOLERANCE {
        return Err(format!(
            "{}: wpm mismatch (expected {}, got {})",
            case.id, expected.wpm, result.wpm
        ));
    }

    let observed_kinds: Vec<DiffKindLabel> = result
        .diff_entries
        .iter()
        .map(|entry| DiffKindLabel::from(entry.kind))
        .collect();
    if observed_kinds != expected.kinds {
        return Err(format!(
            "{}: diff kinds mismatch (expected {:?}, got {:?})",
            case.id, expected.kinds, observed_kinds
        ));
    }

    if let Some(spelling_errors) = expected.spelling_errors {
        let observed = result.counts().spelling_errors;
        if observed != spelling_errors {
            return Err(format!(
                "{}: spelling error count mismatch (expected {spelling_errors}, got {observed})",
                case.id
            ));
        }
    }

    let reference_tokens: Vec<&str> = case.reference.split_whitespace().collect();
    let submitted_tokens: Vec<&str> = case.submitted.split_whitespace().collect();
    if result.reference_tokens() != reference_tokens {
        return Err(format!("{}: diff does not replay the reference", case.id));
    }
    if result.submitted_tokens() != submitted_tokens {
        return Err(format!("{}: diff does not replay the submission", case.id));
    }

    Ok(())
}

fn load_cases(path: &Path) -> Result<Vec<ReferenceCase>, String> {
    let file = File::open(path)
        .map_err(|err| format!("Failed to open fixture '{}': {err}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|err| format!("Failed to parse fixture '{}': {err}", path.display()))
}
