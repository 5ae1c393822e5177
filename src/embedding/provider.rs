//! The provider trait the pipeline embeds through.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::error::EmbeddingError;

/// Batch progress callback, called with percent complete in `0..=100`.
/// Carries a lifetime so callers can pass closures borrowing local state.
pub type ProgressFn<'a> = dyn Fn(u8) + Send + Sync + 'a;

/// Turns text into fixed-dimension unit vectors.
///
/// The contract the pipeline relies on:
/// - one output vector per input text, order-preserving;
/// - every vector is L2-normalized and [`dim`](EmbeddingProvider::dim) long
///   (the zero vector only for degenerate empty input text);
/// - the dimension is fixed for the provider's lifetime;
/// - cancellation is honored between batches and surfaces as
///   [`EmbeddingError::Cancelled`], never as partial results.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Prepares the provider for use (e.g. lazy model loading). The default
    /// is a no-op for providers that load eagerly at construction.
    async fn ensure_ready(&self, _cancel: &CancellationToken) -> Result<(), EmbeddingError> {
        Ok(())
    }

    /// Embeds `texts`, reporting batch progress through `on_progress`.
    async fn embed(
        &self,
        texts: &[String],
        cancel: &CancellationToken,
        on_progress: Option<&ProgressFn>,
    ) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// Output vector dimension.
    fn dim(&self) -> usize;
}
