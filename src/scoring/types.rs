use serde::Serialize;

use crate::constants::{MEDIUM_TEXT_CHARS, SHORT_TEXT_CHARS};
use crate::normalizer::ParsedCandidate;

/// Length-derived reliability label for a candidate's score. Independent of
/// the score itself and of the preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    Low,
    Medium,
    High,
}

impl ConfidenceTier {
    /// Derives the tier from evaluable text: under 40 characters is low,
    /// 40..=120 is medium, over 120 is high.
    pub fn for_text(eval_text: &str) -> Self {
        let len = eval_text.chars().count();
        if len < SHORT_TEXT_CHARS {
            ConfidenceTier::Low
        } else if len <= MEDIUM_TEXT_CHARS {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::High
        }
    }

    /// Lowercase label, as shown to the user.
    pub fn as_str(self) -> &'static str {
        match self {
            ConfidenceTier::Low => "low",
            ConfidenceTier::Medium => "medium",
            ConfidenceTier::High => "high",
        }
    }
}

impl std::fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed candidate paired with its embedding, ready for scoring.
#[derive(Debug, Clone)]
pub struct EmbeddedCandidate {
    pub candidate: ParsedCandidate,
    /// Unit-normalized embedding of the candidate's `eval_text`.
    pub embedding: Vec<f32>,
}

impl EmbeddedCandidate {
    pub fn new(candidate: ParsedCandidate, embedding: Vec<f32>) -> Self {
        Self {
            candidate,
            embedding,
        }
    }
}

/// One ranked output row.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredResult {
    /// The source candidate (metadata and verbatim block included).
    pub candidate: ParsedCandidate,
    /// Blended display score, in `[0, 1]` for all shipped presets.
    pub score: f32,
    pub confidence: ConfidenceTier,
    /// 1-based position in descending score order.
    pub rank: usize,
}
