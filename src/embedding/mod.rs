//! Embedding generation.
//!
//! - [`provider`] defines the [`EmbeddingProvider`] trait the pipeline
//!   consumes: text in, unit vector out, cancellable, batched.
//! - [`minilm`] is the candle-backed sentence encoder (with a deterministic
//!   stub backend for model-less runs).

/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
/// MiniLM-class sentence encoder.
pub mod minilm;
/// Provider trait and progress callbacks.
pub mod provider;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::EmbeddingError;
pub use minilm::{MINILM_EMBEDDING_DIM, MINILM_MAX_SEQ_LEN, MiniLmConfig, MiniLmEmbedder};
pub use provider::{EmbeddingProvider, ProgressFn};

#[cfg(any(test, feature = "mock"))]
pub use mock::MockEmbeddingProvider;
