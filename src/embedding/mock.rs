//! Mock embedding provider for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use super::error::EmbeddingError;
use super::provider::{EmbeddingProvider, ProgressFn};
use crate::scoring::l2_normalize;

/// Deterministic in-memory provider.
///
/// Unknown texts get a hash-seeded unit vector; specific texts can be given
/// scripted embeddings so tests can control similarity geometry exactly.
pub struct MockEmbeddingProvider {
    dim: usize,
    scripted: Mutex<HashMap<String, Vec<f32>>>,
    fail: AtomicBool,
    calls: AtomicUsize,
    texts_embedded: AtomicUsize,
}

impl MockEmbeddingProvider {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            scripted: Mutex::new(HashMap::new()),
            fail: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
            texts_embedded: AtomicUsize::new(0),
        }
    }

    /// Scripts the embedding returned for `text`. The vector is normalized
    /// on insertion so the provider contract holds.
    pub fn with_response(self, text: &str, embedding: Vec<f32>) -> Self {
        self.script(text, embedding);
        self
    }

    /// See [`with_response`](Self::with_response).
    pub fn script(&self, text: &str, mut embedding: Vec<f32>) {
        embedding.resize(self.dim, 0.0);
        l2_normalize(&mut embedding);
        self.scripted.lock().insert(text.to_string(), embedding);
    }

    /// Makes every subsequent `embed` call fail.
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Number of `embed` calls made.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Total number of texts embedded across all calls.
    pub fn texts_embedded(&self) -> usize {
        self.texts_embedded.load(Ordering::SeqCst)
    }

    fn embedding_for(&self, text: &str) -> Vec<f32> {
        if let Some(scripted) = self.scripted.lock().get(text) {
            return scripted.clone();
        }

        use std::hash::{DefaultHasher, Hash, Hasher};
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let mut state = hasher.finish();

        let mut embedding = Vec::with_capacity(self.dim);
        for _ in 0..self.dim {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            embedding.push(((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0);
        }
        l2_normalize(&mut embedding);
        embedding
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed(
        &self,
        texts: &[String],
        cancel: &CancellationToken,
        on_progress: Option<&ProgressFn>,
    ) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if cancel.is_cancelled() {
            return Err(EmbeddingError::Cancelled);
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(EmbeddingError::InferenceFailed {
                reason: "mock provider failure".to_string(),
            });
        }

        self.texts_embedded.fetch_add(texts.len(), Ordering::SeqCst);
        let embeddings = texts.iter().map(|t| self.embedding_for(t)).collect();

        if let Some(progress) = on_progress {
            progress(100);
        }

        Ok(embeddings)
    }

    fn dim(&self) -> usize {
        self.dim
    }
}
