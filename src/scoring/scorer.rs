use std::cmp::Ordering;

use tracing::debug;

use super::error::ScoringError;
use super::preset::Preset;
use super::types::{ConfidenceTier, EmbeddedCandidate, ScoredResult};

/// Dot product of two equal-length vectors.
///
/// Callers must guarantee both inputs are unit-normalized; under that
/// precondition this equals true cosine similarity. No normalization is
/// performed here, and non-normalized input yields a meaningless value.
pub fn cosine_similarity(u: &[f32], v: &[f32]) -> f32 {
    u.iter().zip(v).map(|(a, b)| a * b).sum()
}

/// Scales `v` in place to Euclidean norm 1. A zero vector is left unchanged.
pub fn l2_normalize(v: &mut [f32]) {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v {
            *x /= norm;
        }
    }
}

/// Component-wise mean of the input vectors, L2-normalized.
///
/// Errors on an empty set (the mean is undefined); the reference-set
/// contract means callers never hit that in practice.
pub fn compute_centroid(embeddings: &[Vec<f32>]) -> Result<Vec<f32>, ScoringError> {
    let first = embeddings.first().ok_or(ScoringError::EmptyEmbeddingSet)?;

    let mut centroid = vec![0.0f32; first.len()];
    for embedding in embeddings {
        for (acc, component) in centroid.iter_mut().zip(embedding) {
            *acc += component;
        }
    }

    let count = embeddings.len() as f32;
    for component in &mut centroid {
        *component /= count;
    }

    l2_normalize(&mut centroid);
    Ok(centroid)
}

/// Blends the two similarity signals for one candidate.
///
/// Naturalness is the similarity to the reference centroid; proximity is the
/// mean of the top `min(k, reference count)` reference similarities. The
/// weighted sum lies in `[-1, 1]` for unit weights and is rescaled to the
/// `[0, 1]` display range via `(raw + 1) / 2`.
pub fn score_candidate(
    candidate: &[f32],
    centroid: &[f32],
    references: &[Vec<f32>],
    preset: &Preset,
) -> f32 {
    let naturalness = cosine_similarity(candidate, centroid);

    let mut similarities: Vec<f32> = references
        .iter()
        .map(|reference| cosine_similarity(candidate, reference))
        .collect();
    similarities.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));

    let top = &similarities[..preset.top_k.min(similarities.len())];
    let proximity = top.iter().sum::<f32>() / top.len() as f32;

    let raw = preset.w_naturalness * naturalness + preset.w_proximity * proximity;
    (raw + 1.0) / 2.0
}

/// Scores every candidate and returns them in rank order.
///
/// Sorting is stable and descending by score, so candidates with equal
/// scores keep their original relative order; ranks are assigned 1..N by
/// sorted position. Pure — identical inputs always produce identical output.
pub fn rank_candidates(
    candidates: &[EmbeddedCandidate],
    centroid: &[f32],
    references: &[Vec<f32>],
    preset: &Preset,
) -> Vec<ScoredResult> {
    debug!(
        num_candidates = candidates.len(),
        num_references = references.len(),
        top_k = preset.top_k,
        "Ranking candidates"
    );

    let mut results: Vec<ScoredResult> = candidates
        .iter()
        .map(|embedded| ScoredResult {
            score: score_candidate(&embedded.embedding, centroid, references, preset),
            confidence: ConfidenceTier::for_text(&embedded.candidate.eval_text),
            candidate: embedded.candidate.clone(),
            rank: 0,
        })
        .collect();

    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    for (index, result) in results.iter_mut().enumerate() {
        result.rank = index + 1;
    }

    results
}
