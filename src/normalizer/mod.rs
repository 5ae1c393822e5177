//! Candidate parsing and text normalization.
//!
//! Raw pasted input is split into blank-line-delimited blocks. Each block may
//! carry a contiguous prefix of `key=value` metadata lines; the remainder is
//! the evaluable text. All functions here are total — malformed input
//! degrades to fewer (or zero) candidates, never to an error.

#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::constants::{MAX_CANDIDATES, SHORT_TEXT_CHARS};

/// Blocks are delimited by a run of one-or-more blank lines. A line
/// containing only whitespace counts as blank.
static BLOCK_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("static pattern"));

/// A metadata line is `key=value` after stripping leading whitespace, where
/// the key is one-or-more ASCII word characters. The value is everything
/// after the first `=`. Lines with non-ASCII keys (e.g. `日本語=...`) are
/// content, not metadata.
static METADATA_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_]+)=(.*)$").expect("static pattern"));

/// One unit of input text, with its metadata split out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedCandidate {
    /// Metadata from the block's contiguous `key=value` prefix. Keys are
    /// lowercased; the first occurrence of a key wins.
    pub meta: HashMap<String, String>,
    /// The original block text, verbatim (for display / copy).
    pub raw_text: String,
    /// Normalized, metadata-stripped text used for embedding. Never empty.
    pub eval_text: String,
}

/// Advisory warning produced by [`validate_candidates`]. Rendering (and any
/// localization) is the caller's concern; the variants carry the data a
/// message template needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ValidationWarning {
    /// The input held more blocks than the cap; only the first
    /// [`MAX_CANDIDATES`] were kept. `total` is the true original count.
    Truncated { total: usize },
    /// Every retained candidate is under [`SHORT_TEXT_CHARS`] characters.
    AllShort,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationWarning::Truncated { total } => write!(
                f,
                "input contains {total} candidates; only the first {MAX_CANDIDATES} will be processed"
            ),
            ValidationWarning::AllShort => write!(
                f,
                "all candidates are short (< {SHORT_TEXT_CHARS} characters); results may have lower confidence"
            ),
        }
    }
}

/// Outcome of [`validate_candidates`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    /// `false` only when zero candidates remained after parsing.
    pub valid: bool,
    /// Advisory, non-blocking warnings.
    pub warnings: Vec<ValidationWarning>,
}

/// Normalizes text for embedding: lowercase, line breaks to spaces,
/// whitespace runs collapsed to one space, trimmed. Punctuation and
/// apostrophes are preserved verbatim.
///
/// Pure and total; idempotent.
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses a single block into a candidate record.
///
/// Metadata lines are recognized only while contiguous from the top of the
/// block; the first line that does not match ends recognition, and every
/// later line is content even if it looks like `key=value`. Returns `None`
/// when the normalized content is empty (e.g. a metadata-only block).
pub fn parse_candidate_block(block: &str) -> Option<ParsedCandidate> {
    let mut meta = HashMap::new();
    let mut content_lines: Vec<&str> = Vec::new();
    let mut metadata_ended = false;

    for line in block.lines() {
        if !metadata_ended {
            if let Some(captures) = METADATA_LINE.captures(line.trim_start()) {
                let key = captures[1].to_lowercase();
                let value = captures[2].trim();
                meta.entry(key).or_insert_with(|| value.to_string());
                continue;
            }
            metadata_ended = true;
        }
        content_lines.push(line);
    }

    let eval_text = normalize_text(&content_lines.join("\n"));
    if eval_text.is_empty() {
        return None;
    }

    Some(ParsedCandidate {
        meta,
        raw_text: block.to_string(),
        eval_text,
    })
}

/// Splits raw input into blocks and parses each one.
///
/// Blocks producing empty evaluable text are dropped silently; of the
/// remainder, only the first [`MAX_CANDIDATES`] are kept, in input order.
pub fn parse_candidates(input: &str) -> Vec<ParsedCandidate> {
    BLOCK_DELIMITER
        .split(input)
        .filter_map(parse_candidate_block)
        .take(MAX_CANDIDATES)
        .collect()
}

/// Checks a parsed candidate set against the raw input it came from.
///
/// Fails (`valid == false`) only when no candidates remain. The truncation
/// and short-candidate warnings are independent; both may fire.
pub fn validate_candidates(candidates: &[ParsedCandidate], raw_input: &str) -> Validation {
    if candidates.is_empty() {
        return Validation {
            valid: false,
            warnings: Vec::new(),
        };
    }

    let mut warnings = Vec::new();

    let total = BLOCK_DELIMITER
        .split(raw_input)
        .filter(|block| !block.trim().is_empty())
        .count();
    if total > MAX_CANDIDATES {
        warnings.push(ValidationWarning::Truncated { total });
    }

    if candidates
        .iter()
        .all(|c| c.eval_text.chars().count() < SHORT_TEXT_CHARS)
    {
        warnings.push(ValidationWarning::AllShort);
    }

    Validation {
        valid: true,
        warnings,
    }
}
