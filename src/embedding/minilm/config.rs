use std::path::{Path, PathBuf};

use crate::embedding::error::EmbeddingError;

/// Output dimension of MiniLM-class sentence encoders.
pub const MINILM_EMBEDDING_DIM: usize = crate::constants::DEFAULT_EMBEDDING_DIM;

/// Default max tokens per text.
pub const MINILM_MAX_SEQ_LEN: usize = crate::constants::DEFAULT_MAX_SEQ_LEN;

#[derive(Debug, Clone)]
/// Configuration for [`MiniLmEmbedder`](super::MiniLmEmbedder).
pub struct MiniLmConfig {
    /// Directory holding `config.json`, `model.safetensors` and
    /// `tokenizer.json`.
    pub model_dir: PathBuf,
    /// Output embedding dimension (must match the model's hidden size).
    pub embedding_dim: usize,
    /// Max tokens to consider per text.
    pub max_seq_len: usize,
    /// Texts per batch between cancellation checks / yields.
    pub batch_size: usize,
    /// If true, produce deterministic hash-seeded embeddings instead of
    /// running a model (no model files required).
    pub testing_stub: bool,
}

impl Default for MiniLmConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::new(),
            embedding_dim: MINILM_EMBEDDING_DIM,
            max_seq_len: MINILM_MAX_SEQ_LEN,
            batch_size: crate::constants::DEFAULT_BATCH_SIZE,
            testing_stub: false,
        }
    }
}

impl MiniLmConfig {
    /// Creates a config for a local model directory.
    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: model_dir.into(),
            ..Default::default()
        }
    }

    /// Creates a stub config (no model files; deterministic embeddings).
    pub fn stub() -> Self {
        Self {
            testing_stub: true,
            ..Default::default()
        }
    }

    /// Path to the model's `config.json`.
    pub fn config_path(&self) -> PathBuf {
        self.model_dir.join("config.json")
    }

    /// Path to the model's `model.safetensors`.
    pub fn weights_path(&self) -> PathBuf {
        self.model_dir.join("model.safetensors")
    }

    /// Path to the model's `tokenizer.json`.
    pub fn tokenizer_path(&self) -> PathBuf {
        self.model_dir.join("tokenizer.json")
    }

    /// Returns `true` if every required model file is present.
    pub fn model_available(&self) -> bool {
        !self.model_dir.as_os_str().is_empty()
            && file_exists(&self.config_path())
            && file_exists(&self.weights_path())
            && file_exists(&self.tokenizer_path())
    }

    /// Validates required fields for non-stub mode.
    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.embedding_dim == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "embedding_dim must be nonzero".to_string(),
            });
        }
        if self.batch_size == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "batch_size must be nonzero".to_string(),
            });
        }

        if self.testing_stub {
            return Ok(());
        }

        if self.model_dir.as_os_str().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model_dir is required (stubbing is disabled)".to_string(),
            });
        }
        if !self.model_available() {
            return Err(EmbeddingError::ModelNotFound {
                path: self.model_dir.clone(),
            });
        }

        Ok(())
    }
}

fn file_exists(path: &Path) -> bool {
    path.is_file()
}
