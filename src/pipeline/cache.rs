use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

/// Reference embeddings plus their centroid, ready for scoring.
#[derive(Debug)]
pub struct ReferenceVectors {
    pub embeddings: Vec<Vec<f32>>,
    pub centroid: Vec<f32>,
}

/// Single-slot cache of [`ReferenceVectors`], keyed by canonical language
/// code.
///
/// Storing a different language atomically replaces the slot, so a language
/// change can never serve stale vectors. Only one run is active at a time by
/// construction of the caller, so one slot is all that's needed.
#[derive(Debug, Default)]
pub struct ReferenceCache {
    slot: Mutex<Option<(String, Arc<ReferenceVectors>)>>,
}

impl ReferenceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached vectors if they belong to `language`.
    pub fn get(&self, language: &str) -> Option<Arc<ReferenceVectors>> {
        let slot = self.slot.lock();
        match slot.as_ref() {
            Some((cached_language, vectors)) if cached_language == language => {
                debug!(language, "Reference cache hit");
                Some(Arc::clone(vectors))
            }
            _ => None,
        }
    }

    /// Stores vectors for `language`, replacing whatever was cached.
    pub fn store(&self, language: &str, vectors: ReferenceVectors) -> Arc<ReferenceVectors> {
        let vectors = Arc::new(vectors);
        *self.slot.lock() = Some((language.to_string(), Arc::clone(&vectors)));
        debug!(language, "Reference cache updated");
        vectors
    }

    /// Drops the cached entry, whatever its language.
    pub fn invalidate(&self) {
        *self.slot.lock() = None;
    }
}
