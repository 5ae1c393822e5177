//! The five-stage ranking pipeline.
//!
//! Load model → parse/validate input → prepare references → embed candidates
//! → score and rank. The cancellation token is checked between stages (and
//! inside the provider between batches); once it fires the run ends with
//! [`PipelineError::Cancelled`] and is not resumed. Reference embeddings and
//! their centroid are cached per language and invalidated when the language
//! changes.

pub mod cache;
pub mod error;

#[cfg(test)]
mod tests;

pub use cache::{ReferenceCache, ReferenceVectors};
pub use error::PipelineError;

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::embedding::EmbeddingProvider;
use crate::normalizer::{ValidationWarning, parse_candidates, validate_candidates};
use crate::reference::{canonical_language, reference_sentences};
use crate::scoring::{EmbeddedCandidate, PresetName, ScoredResult, compute_centroid, rank_candidates};

/// Pipeline stage, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    LoadModel,
    ParseInput,
    PrepareReferences,
    EmbedCandidates,
    Rank,
}

impl Stage {
    /// 1-based position, for progress display.
    pub fn number(self) -> usize {
        match self {
            Stage::LoadModel => 1,
            Stage::ParseInput => 2,
            Stage::PrepareReferences => 3,
            Stage::EmbedCandidates => 4,
            Stage::Rank => 5,
        }
    }
}

/// Receives stage transitions and embedding batch progress during a run.
/// All methods default to no-ops.
pub trait RunObserver: Send + Sync {
    fn stage(&self, _stage: Stage) {}
    /// Candidate embedding progress, percent in `0..=100`.
    fn embed_progress(&self, _percent: u8) {}
}

/// Observer that ignores everything.
pub struct NullObserver;

impl RunObserver for NullObserver {}

/// What to rank and how.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub preset: PresetName,
    /// Reference-set language code (region subtags ignored).
    pub language: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            preset: PresetName::Balanced,
            language: crate::constants::DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// Everything a caller needs to present a finished run.
#[derive(Debug)]
pub struct RunReport {
    /// Ranked results, best first.
    pub results: Vec<ScoredResult>,
    /// Advisory warnings from input validation.
    pub warnings: Vec<ValidationWarning>,
    /// Preset the scores were computed with.
    pub preset: PresetName,
    /// Canonical language the references came from.
    pub language: String,
    /// Total wall time of the run.
    pub elapsed: Duration,
}

/// Owns the provider and the reference cache; runs ranked evaluations.
pub struct RankPipeline {
    provider: Arc<dyn EmbeddingProvider>,
    references: ReferenceCache,
}

impl RankPipeline {
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            provider,
            references: ReferenceCache::new(),
        }
    }

    /// Drops cached reference vectors. Callers invoke this on a language
    /// change; a run with a new language also replaces the cache on its own.
    pub fn invalidate_references(&self) {
        self.references.invalidate();
    }

    /// Runs the full pipeline over `input`.
    pub async fn run(
        &self,
        input: &str,
        options: &RunOptions,
        cancel: &CancellationToken,
        observer: &dyn RunObserver,
    ) -> Result<RunReport, PipelineError> {
        let started = Instant::now();
        let language = canonical_language(&options.language);
        let preset = options.preset.preset();

        observer.stage(Stage::LoadModel);
        self.provider.ensure_ready(cancel).await?;
        checkpoint(cancel)?;

        observer.stage(Stage::ParseInput);
        let candidates = parse_candidates(input);
        let validation = validate_candidates(&candidates, input);
        if !validation.valid {
            return Err(PipelineError::NoCandidates);
        }
        debug!(
            num_candidates = candidates.len(),
            num_warnings = validation.warnings.len(),
            "Input parsed"
        );
        checkpoint(cancel)?;

        observer.stage(Stage::PrepareReferences);
        let references = self.prepare_references(&language, cancel).await?;
        checkpoint(cancel)?;

        observer.stage(Stage::EmbedCandidates);
        let eval_texts: Vec<String> = candidates.iter().map(|c| c.eval_text.clone()).collect();
        let progress = |percent: u8| observer.embed_progress(percent);
        let embeddings = self
            .provider
            .embed(&eval_texts, cancel, Some(&progress))
            .await?;
        checkpoint(cancel)?;

        observer.stage(Stage::Rank);
        let embedded: Vec<EmbeddedCandidate> = candidates
            .into_iter()
            .zip(embeddings)
            .map(|(candidate, embedding)| EmbeddedCandidate::new(candidate, embedding))
            .collect();
        let results = rank_candidates(
            &embedded,
            &references.centroid,
            &references.embeddings,
            &preset,
        );

        let elapsed = started.elapsed();
        info!(
            num_results = results.len(),
            preset = %options.preset,
            language = %language,
            elapsed_ms = elapsed.as_millis() as u64,
            "Ranking run complete"
        );

        Ok(RunReport {
            results,
            warnings: validation.warnings,
            preset: options.preset,
            language,
            elapsed,
        })
    }

    /// Embeds the reference set for `language` (or reuses the cached
    /// vectors) and computes the centroid.
    async fn prepare_references(
        &self,
        language: &str,
        cancel: &CancellationToken,
    ) -> Result<Arc<ReferenceVectors>, PipelineError> {
        if let Some(cached) = self.references.get(language) {
            return Ok(cached);
        }

        let sentences: Vec<String> = reference_sentences(language)
            .iter()
            .map(|s| s.to_string())
            .collect();
        debug!(
            language,
            num_sentences = sentences.len(),
            "Embedding reference set"
        );

        let embeddings = self.provider.embed(&sentences, cancel, None).await?;
        let centroid = compute_centroid(&embeddings)?;

        Ok(self.references.store(
            language,
            ReferenceVectors {
                embeddings,
                centroid,
            },
        ))
    }
}

fn checkpoint(cancel: &CancellationToken) -> Result<(), PipelineError> {
    if cancel.is_cancelled() {
        Err(PipelineError::Cancelled)
    } else {
        Ok(())
    }
}
