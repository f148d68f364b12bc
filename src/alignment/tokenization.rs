use crate::config::ScoringConfig;

/// Split raw text into word tokens on Unicode whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Fold typographic quotes to their ASCII forms.
pub fn fold_quotes(c: char) -> char {
    match c {
        '\u{2018}' | '\u{2019}' => '\'',
        '\u{201C}' | '\u{201D}' => '"',
        other => other,
    }
}

/// Comparison key for a token under `config`.
///
/// With `ignore_punctuation`, leading and trailing non-alphanumeric
/// characters are stripped and inner typographic quotes are folded, so
/// `"Hello."` and `hello` compare equal and `don’t` equals `don't`.
/// A token made only of punctuation keeps its original text as the key.
///
/// Without `ignore_punctuation` the token is compared as typed, quotes
/// included: `don’t` and `don't` are then different words.
pub fn normalize_token(token: &str, config: &ScoringConfig) -> String {
    let stripped = if config.ignore_punctuation {
        let trimmed = token.trim_matches(|c: char| !c.is_alphanumeric());
        if trimmed.is_empty() {
            token.to_string()
        } else {
            trimmed.chars().map(fold_quotes).collect()
        }
    } else {
        token.to_string()
    };

    if config.case_sensitive {
        stripped
    } else {
        stripped.to_lowercase()
    }
}

pub fn normalize_tokens<S: AsRef<str>>(tokens: &[S], config: &ScoringConfig) -> Vec<String> {
    tokens
        .iter()
        .map(|token| normalize_token(token.as_ref(), config))
        .collect()
}
