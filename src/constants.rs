//! Cross-cutting, shared constants.
//!
//! Prefer deriving secondary constants from primary ones to avoid drift.

/// Embedding dimension produced by MiniLM-class sentence encoders.
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Hard cap on retained candidates per run.
pub const MAX_CANDIDATES: usize = 200;

/// Below this many characters a candidate is considered low-signal.
pub const SHORT_TEXT_CHARS: usize = 40;

/// Upper bound (inclusive) of the medium confidence tier.
pub const MEDIUM_TEXT_CHARS: usize = 120;

/// Texts embedded per batch before yielding back to the runtime.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Max tokens fed to the sentence encoder per text.
pub const DEFAULT_MAX_SEQ_LEN: usize = 256;

/// Reference-set language used when the caller does not pick one.
pub const DEFAULT_LANGUAGE: &str = "en";
