//! Attune library crate (used by the CLI binary and integration tests).
//!
//! Ranks short text candidates by semantic naturalness: candidates are
//! embedded with a sentence encoder and scored against a reference corpus,
//! blending closeness to the corpus centroid (naturalness) with closeness to
//! the nearest reference sentences (proximity).
//!
//! # Public API Surface
//!
//! ## Parsing
//! - [`parse_candidates`], [`validate_candidates`], [`normalize_text`] -
//!   raw input to [`ParsedCandidate`] records plus advisory warnings
//!
//! ## Scoring
//! - [`rank_candidates`], [`score_candidate`], [`compute_centroid`],
//!   [`cosine_similarity`], [`l2_normalize`] - the scoring math
//! - [`Preset`], [`PresetName`], [`ConfidenceTier`], [`ScoredResult`]
//!
//! ## Embedding
//! - [`EmbeddingProvider`] - the provider trait the pipeline consumes
//! - [`MiniLmEmbedder`], [`MiniLmConfig`] - candle-backed sentence encoder
//!
//! ## Orchestration
//! - [`RankPipeline`], [`RunOptions`], [`RunReport`], [`Stage`],
//!   [`RunObserver`] - the five-stage cancellable run
//! - [`reference_sentences`] - per-language reference sets
//!
//! ## Test/Mock Support
//! [`MockEmbeddingProvider`] is available behind
//! `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod embedding;
pub mod normalizer;
pub mod pipeline;
pub mod reference;
pub mod scoring;

pub use config::{Config, ConfigError};
pub use embedding::{
    EmbeddingError, EmbeddingProvider, MINILM_EMBEDDING_DIM, MINILM_MAX_SEQ_LEN, MiniLmConfig,
    MiniLmEmbedder,
};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEmbeddingProvider;
pub use normalizer::{
    ParsedCandidate, Validation, ValidationWarning, normalize_text, parse_candidate_block,
    parse_candidates, validate_candidates,
};
pub use pipeline::{
    NullObserver, PipelineError, RankPipeline, ReferenceCache, ReferenceVectors, RunObserver,
    RunOptions, RunReport, Stage,
};
pub use reference::{canonical_language, reference_sentences, supported_languages};
pub use scoring::{
    ConfidenceTier, EmbeddedCandidate, Preset, PresetName, ScoredResult, ScoringError,
    compute_centroid, cosine_similarity, l2_normalize, rank_candidates, score_candidate,
};
