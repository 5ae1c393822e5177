//! MiniLM-class sentence encoder (BERT + mean pooling).
//!
//! Loads a local safetensors checkpoint and `tokenizer.json`, runs the
//! encoder, mean-pools the token states and L2-normalizes the result. Use
//! [`MiniLmConfig::stub`] for deterministic model-less embeddings in tests
//! or dry runs.

/// MiniLM configuration.
pub mod config;


pub use config::{MINILM_EMBEDDING_DIM, MINILM_MAX_SEQ_LEN, MiniLmConfig};

use std::sync::Arc;

use async_trait::async_trait;
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::embedding::device::select_device;
use crate::embedding::error::EmbeddingError;
use crate::embedding::provider::{EmbeddingProvider, ProgressFn};
use crate::scoring::l2_normalize;

enum EncoderBackend {
    Model {
        model: Arc<BertModel>,
        tokenizer: Arc<tokenizers::Tokenizer>,
        device: Device,
    },
    Stub,
}

/// Sentence embedder for candidate and reference text.
pub struct MiniLmEmbedder {
    backend: EncoderBackend,
    config: MiniLmConfig,
}

impl std::fmt::Debug for MiniLmEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiniLmEmbedder")
            .field(
                "backend",
                &match &self.backend {
                    EncoderBackend::Model { device, .. } => format!("Model({device:?})"),
                    EncoderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("embedding_dim", &self.config.embedding_dim)
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl MiniLmEmbedder {
    /// Loads the embedder from a config (stub mode is supported).
    pub fn load(config: MiniLmConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        if config.testing_stub {
            warn!("MiniLM embedder running in STUB mode (deterministic vectors, no model)");
            return Ok(Self {
                backend: EncoderBackend::Stub,
                config,
            });
        }

        let device = select_device()?;
        debug!(?device, "Selected compute device for MiniLM");

        let (model, tokenizer) = Self::load_model(&config, &device)?;

        info!(
            model_dir = %config.model_dir.display(),
            embedding_dim = config.embedding_dim,
            max_seq_len = config.max_seq_len,
            "MiniLM sentence encoder loaded"
        );

        Ok(Self {
            backend: EncoderBackend::Model {
                model: Arc::new(model),
                tokenizer: Arc::new(tokenizer),
                device,
            },
            config,
        })
    }

    fn load_model(
        config: &MiniLmConfig,
        device: &Device,
    ) -> Result<(BertModel, tokenizers::Tokenizer), EmbeddingError> {
        let tokenizer = tokenizers::Tokenizer::from_file(config.tokenizer_path()).map_err(|e| {
            EmbeddingError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {e}"),
            }
        })?;

        let config_content = std::fs::read_to_string(config.config_path())?;
        let bert_config: BertConfig = serde_json::from_str(&config_content).map_err(|e| {
            EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to parse model config: {e}"),
            }
        })?;

        if bert_config.hidden_size != config.embedding_dim {
            return Err(EmbeddingError::InvalidConfig {
                reason: format!(
                    "embedding_dim ({}) does not match model hidden_size ({})",
                    config.embedding_dim, bert_config.hidden_size
                ),
            });
        }

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[config.weights_path()], DType::F32, device)?
        };
        let model = BertModel::load(vb, &bert_config).map_err(|e| {
            EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to load BERT weights: {e}"),
            }
        })?;

        Ok((model, tokenizer))
    }

    /// Generates one unit-normalized embedding.
    pub fn embed_one(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match &self.backend {
            EncoderBackend::Model {
                model,
                tokenizer,
                device,
            } => self.embed_with_model(text, model, tokenizer, device),
            EncoderBackend::Stub => Ok(self.embed_stub(text)),
        }
    }

    fn embed_with_model(
        &self,
        text: &str,
        model: &BertModel,
        tokenizer: &tokenizers::Tokenizer,
        device: &Device,
    ) -> Result<Vec<f32>, EmbeddingError> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let mut tokens: Vec<u32> = encoding.get_ids().to_vec();
        if tokens.is_empty() {
            // Degenerate empty input: the zero vector, per the provider contract.
            return Ok(vec![0.0; self.config.embedding_dim]);
        }
        tokens.truncate(self.config.max_seq_len);

        debug!(
            text_len = text.len(),
            token_count = tokens.len(),
            "Encoding text"
        );

        let input_ids = Tensor::new(&tokens[..], device)?.unsqueeze(0)?;
        let token_type_ids = input_ids.zeros_like()?;

        // [1, seq_len, hidden] -> mean over the sequence -> [hidden]
        let hidden_states = model.forward(&input_ids, &token_type_ids, None)?;
        let pooled = hidden_states.mean(1)?.squeeze(0)?;

        let mut embedding = pooled.to_vec1::<f32>()?;
        l2_normalize(&mut embedding);
        Ok(embedding)
    }

    fn embed_stub(&self, text: &str) -> Vec<f32> {
        use std::hash::{DefaultHasher, Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let mut state = hasher.finish();

        let mut embedding = Vec::with_capacity(self.config.embedding_dim);
        for _ in 0..self.config.embedding_dim {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let value = ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0;
            embedding.push(value);
        }

        l2_normalize(&mut embedding);
        embedding
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EncoderBackend::Stub)
    }

    /// Returns the embedder configuration.
    pub fn config(&self) -> &MiniLmConfig {
        &self.config
    }
}

#[async_trait]
impl EmbeddingProvider for MiniLmEmbedder {
    async fn embed(
        &self,
        texts: &[String],
        cancel: &CancellationToken,
        on_progress: Option<&ProgressFn>,
    ) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let total = texts.len();
        if total == 0 {
            return Ok(Vec::new());
        }

        let mut embeddings = Vec::with_capacity(total);
        for batch in texts.chunks(self.config.batch_size) {
            if cancel.is_cancelled() {
                return Err(EmbeddingError::Cancelled);
            }

            for text in batch {
                embeddings.push(self.embed_one(text)?);
            }

            if let Some(progress) = on_progress {
                let percent = (embeddings.len() * 100 / total).min(100) as u8;
                progress(percent);
            }

            // Keep the host event loop responsive between batches.
            tokio::task::yield_now().await;
        }

        Ok(embeddings)
    }

    fn dim(&self) -> usize {
        self.config.embedding_dim
    }
}
