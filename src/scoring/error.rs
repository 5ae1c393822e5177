use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoringError {
    /// A centroid over zero embeddings has no defined mean. The reference-set
    /// contract guarantees a non-empty set, so hitting this is a programming
    /// error, not a user-facing condition.
    #[error("cannot compute the centroid of an empty embedding set")]
    EmptyEmbeddingSet,
}
