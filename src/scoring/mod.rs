//! Scoring: from embeddings to a ranked candidate list.
//!
//! Two signals are blended per [`Preset`]: *naturalness* (similarity to the
//! centroid of the reference set) and *proximity* (mean similarity to the
//! top-k nearest reference sentences). [`rank_candidates`] is the sole entry
//! point combining them — a pure function of its inputs with no hidden state.
//!
//! All similarity math assumes unit-normalized vectors; the embedding
//! provider contract guarantees that, and [`compute_centroid`] re-normalizes
//! its output.

pub mod error;
pub mod preset;
pub mod scorer;
pub mod types;


pub use error::ScoringError;
pub use preset::{Preset, PresetName};
pub use scorer::{
    compute_centroid, cosine_similarity, l2_normalize, rank_candidates, score_candidate,
};
pub use types::{ConfidenceTier, EmbeddedCandidate, ScoredResult};
