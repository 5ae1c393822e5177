use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::scoring::ScoringError;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// No candidates remained after parsing. Blocking: the run does not
    /// proceed and the user is asked for input.
    #[error("no candidates to rank (input was empty after parsing)")]
    NoCandidates,

    /// The run was cancelled cooperatively. Informational, not an error
    /// condition; partial work is discarded.
    #[error("run cancelled")]
    Cancelled,

    /// The embedding provider failed (model load, inference). Surfaced as a
    /// generic processing error; retry is a user-initiated re-run.
    #[error("embedding provider failure: {0}")]
    Provider(#[source] EmbeddingError),

    /// Scoring precondition fault (empty reference set). The reference-set
    /// contract makes this unreachable in practice.
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

impl From<EmbeddingError> for PipelineError {
    fn from(err: EmbeddingError) -> Self {
        match err {
            EmbeddingError::Cancelled => PipelineError::Cancelled,
            other => PipelineError::Provider(other),
        }
    }
}

impl PipelineError {
    /// Returns `true` for the cooperative-cancellation outcome.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, PipelineError::Cancelled)
    }
}
