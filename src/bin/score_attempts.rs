use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Parser, ValueEnum};
use dictation_scoring::{
    analyze_punctuation, PunctuationDiscrepancy, ScoreResult, ScoringConfig, ScoringEngine,
    WpmBasis,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

#[path = "score_attempts/json_report_formatter.rs"]
mod json_report_formatter;

const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum WpmBasisChoice {
    Reference,
    Submitted,
}

impl From<WpmBasisChoice> for WpmBasis {
    fn from(choice: WpmBasisChoice) -> Self {
        match choice {
            WpmBasisChoice::Reference => WpmBasis::Reference,
            WpmBasisChoice::Submitted => WpmBasis::Submitted,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "score_attempts")]
#[command(about = "Score a batch of dictation or typing attempts against their reference texts")]
struct Args {
    /// JSON array of `{ id, reference, submitted, elapsed_seconds }` objects.
    #[arg(long, env = "DICTATION_SCORING_ATTEMPTS")]
    attempts: PathBuf,
    /// JSON scoring config; omitted fields take their defaults.
    #[arg(long, env = "DICTATION_SCORING_CONFIG")]
    config: Option<PathBuf>,
    /// Report destination. Defaults to stdout.
    #[arg(long, env = "DICTATION_SCORING_OUT")]
    out: Option<PathBuf>,
    #[arg(long, default_value_t = false)]
    case_sensitive: bool,
    #[arg(long, default_value_t = false)]
    keep_punctuation: bool,
    #[arg(long, value_enum)]
    wpm_basis: Option<WpmBasisChoice>,
    #[arg(long, env = "DICTATION_SCORING_NO_PROGRESS", default_value_t = false)]
    no_progress: bool,
}

#[derive(Debug, Deserialize)]
struct Attempt {
    id: String,
    reference: String,
    submitted: String,
    elapsed_seconds: f64,
}

#[derive(Debug, Serialize)]
struct BatchReport {
    schema_version: u32,
    meta: Meta,
    attempts: Vec<AttemptRecord>,
}

#[derive(Debug, Serialize)]
struct Meta {
    generated_at: String,
    config: ScoringConfig,
    attempt_count: usize,
    failed_count: usize,
}

#[derive(Debug, Serialize)]
struct AttemptRecord {
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<ScoreResult>,
    punctuation: Vec<PunctuationDiscrepancy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        tracing::error!(error = err.as_str(), "score_attempts failed");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = Args::parse();
    let config = resolve_config(&args)?;
    let attempts = load_attempts(&args.attempts)?;
    if attempts.is_empty() {
        return Err(format!(
            "No attempts found in '{}'.",
            args.attempts.display()
        ));
    }

    let engine = ScoringEngine::new(config);
    let progress = if args.no_progress {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(attempts.len() as u64)
    };
    progress.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );

    let mut records = Vec::with_capacity(attempts.len());
    let mut failed_count = 0usize;
    for attempt in &attempts {
        progress.set_message(attempt.id.clone());
        let record = score_attempt(&engine, attempt);
        if record.error.is_some() {
            failed_count += 1;
        }
        records.push(record);
        progress.inc(1);
    }
    progress.finish_with_message("scoring complete");

    let report = BatchReport {
        schema_version: SCHEMA_VERSION,
        meta: Meta {
            generated_at: Utc::now().to_rfc3339(),
            config,
            attempt_count: records.len(),
            failed_count,
        },
        attempts: records,
    };
    json_report_formatter::write_report(args.out.as_deref(), &report)?;
    if let Some(out) = args.out.as_ref() {
        tracing::info!(path = %out.display(), "report written");
    }
    Ok(())
}

/// Score one attempt. A rejected attempt becomes a record with `error` set
/// so the rest of the batch still runs.
fn score_attempt(engine: &ScoringEngine, attempt: &Attempt) -> AttemptRecord {
    let punctuation = analyze_punctuation(&attempt.reference, &attempt.submitted);
    match engine.score_text(
        &attempt.reference,
        &attempt.submitted,
        attempt.elapsed_seconds,
    ) {
        Ok(result) => AttemptRecord {
            id: attempt.id.clone(),
            result: Some(result),
            punctuation,
            error: None,
        },
        Err(err) => {
            tracing::warn!(attempt = attempt.id.as_str(), error = %err, "attempt not scored");
            AttemptRecord {
                id: attempt.id.clone(),
                result: None,
                punctuation,
                error: Some(err.to_string()),
            }
        }
    }
}

fn resolve_config(args: &Args) -> Result<ScoringConfig, String> {
    let mut config = match args.config.as_ref() {
        Some(path) => ScoringConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?,
        None => ScoringConfig::default(),
    };
    if args.case_sensitive {
        config.case_sensitive = true;
    }
    if args.keep_punctuation {
        config.ignore_punctuation = false;
    }
    if let Some(basis) = args.wpm_basis {
        config.wpm_basis = basis.into();
    }
    Ok(config)
}

fn load_attempts(path: &Path) -> Result<Vec<Attempt>, String> {
    let file = File::open(path)
        .map_err(|err| format!("Failed to open attempts file '{}': {err}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|err| format!("Failed to parse attempts file '{}': {err}", path.display()))
}
