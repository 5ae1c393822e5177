use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use super::*;
use crate::embedding::MockEmbeddingProvider;
use crate::normalizer::ValidationWarning;

const DIM: usize = 8;

fn pipeline_with(provider: MockEmbeddingProvider) -> (RankPipeline, Arc<MockEmbeddingProvider>) {
    let provider = Arc::new(provider);
    (RankPipeline::new(provider.clone()), provider)
}

struct RecordingObserver {
    stages: Mutex<Vec<Stage>>,
    progress_events: AtomicUsize,
}

impl RecordingObserver {
    fn new() -> Self {
        Self {
            stages: Mutex::new(Vec::new()),
            progress_events: AtomicUsize::new(0),
        }
    }
}

impl RunObserver for RecordingObserver {
    fn stage(&self, stage: Stage) {
        self.stages.lock().push(stage);
    }

    fn embed_progress(&self, _percent: u8) {
        self.progress_events.fetch_add(1, Ordering::SeqCst);
    }
}

#[tokio::test]
async fn test_run_produces_ranked_report() {
    let (pipeline, _provider) = pipeline_with(MockEmbeddingProvider::new(DIM));
    let cancel = CancellationToken::new();

    let report = pipeline
        .run(
            "the first candidate\n\nthe second candidate",
            &RunOptions::default(),
            &cancel,
            &NullObserver,
        )
        .await
        .unwrap();

    assert_eq!(report.results.len(), 2);
    assert_eq!(report.results[0].rank, 1);
    assert_eq!(report.results[1].rank, 2);
    assert!(report.results[0].score >= report.results[1].score);
    assert_eq!(report.language, "en");
    assert_eq!(report.preset, PresetName::Balanced);
}

#[tokio::test]
async fn test_run_is_deterministic() {
    let (pipeline, _provider) = pipeline_with(MockEmbeddingProvider::new(DIM));
    let cancel = CancellationToken::new();
    let input = "alpha text\n\nbeta text\n\ngamma text";

    let order = |report: &RunReport| {
        report
            .results
            .iter()
            .map(|r| r.candidate.eval_text.clone())
            .collect::<Vec<_>>()
    };

    let first = pipeline
        .run(input, &RunOptions::default(), &cancel, &NullObserver)
        .await
        .unwrap();
    let second = pipeline
        .run(input, &RunOptions::default(), &cancel, &NullObserver)
        .await
        .unwrap();

    assert_eq!(order(&first), order(&second));
}

#[tokio::test]
async fn test_empty_input_is_rejected_before_any_embedding() {
    let (pipeline, provider) = pipeline_with(MockEmbeddingProvider::new(DIM));
    let cancel = CancellationToken::new();

    let result = pipeline
        .run("shift=13\n\n   ", &RunOptions::default(), &cancel, &NullObserver)
        .await;

    assert!(matches!(result, Err(PipelineError::NoCandidates)));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_pre_cancelled_token_aborts_run() {
    let (pipeline, _provider) = pipeline_with(MockEmbeddingProvider::new(DIM));
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = pipeline
        .run("some candidate", &RunOptions::default(), &cancel, &NullObserver)
        .await;

    assert!(matches!(result, Err(PipelineError::Cancelled)));
}

#[tokio::test]
async fn test_provider_failure_surfaces_as_provider_error() {
    let (pipeline, provider) = pipeline_with(MockEmbeddingProvider::new(DIM));
    provider.set_fail(true);
    let cancel = CancellationToken::new();

    let result = pipeline
        .run("some candidate", &RunOptions::default(), &cancel, &NullObserver)
        .await;

    assert!(matches!(result, Err(PipelineError::Provider(_))));
}

#[tokio::test]
async fn test_reference_embeddings_cached_across_runs() {
    let (pipeline, provider) = pipeline_with(MockEmbeddingProvider::new(DIM));
    let cancel = CancellationToken::new();
    let reference_count = crate::reference::reference_sentences("en").len();

    pipeline
        .run("candidate one", &RunOptions::default(), &cancel, &NullObserver)
        .await
        .unwrap();
    let after_first = provider.texts_embedded();
    assert_eq!(after_first, reference_count + 1);

    pipeline
        .run("candidate two", &RunOptions::default(), &cancel, &NullObserver)
        .await
        .unwrap();
    // Second run embeds only its candidate; references come from the cache.
    assert_eq!(provider.texts_embedded(), after_first + 1);
}

#[tokio::test]
async fn test_language_change_re_embeds_references() {
    let (pipeline, provider) = pipeline_with(MockEmbeddingProvider::new(DIM));
    let cancel = CancellationToken::new();

    pipeline
        .run("candidate", &RunOptions::default(), &cancel, &NullObserver)
        .await
        .unwrap();
    let after_en = provider.texts_embedded();

    let japanese = RunOptions {
        language: "ja".to_string(),
        ..RunOptions::default()
    };
    pipeline
        .run("候補のテキスト", &japanese, &cancel, &NullObserver)
        .await
        .unwrap();

    let ja_references = crate::reference::reference_sentences("ja").len();
    assert_eq!(provider.texts_embedded(), after_en + ja_references + 1);
}

#[tokio::test]
async fn test_invalidate_references_forces_re_embedding() {
    let (pipeline, provider) = pipeline_with(MockEmbeddingProvider::new(DIM));
    let cancel = CancellationToken::new();

    pipeline
        .run("candidate", &RunOptions::default(), &cancel, &NullObserver)
        .await
        .unwrap();
    let after_first = provider.texts_embedded();

    pipeline.invalidate_references();
    pipeline
        .run("candidate", &RunOptions::default(), &cancel, &NullObserver)
        .await
        .unwrap();

    let reference_count = crate::reference::reference_sentences("en").len();
    assert_eq!(
        provider.texts_embedded(),
        after_first + reference_count + 1
    );
}

#[tokio::test]
async fn test_observer_sees_stages_in_order() {
    let (pipeline, _provider) = pipeline_with(MockEmbeddingProvider::new(DIM));
    let cancel = CancellationToken::new();
    let observer = RecordingObserver::new();

    pipeline
        .run("watched candidate", &RunOptions::default(), &cancel, &observer)
        .await
        .unwrap();

    let stages = observer.stages.lock().clone();
    assert_eq!(
        stages,
        vec![
            Stage::LoadModel,
            Stage::ParseInput,
            Stage::PrepareReferences,
            Stage::EmbedCandidates,
            Stage::Rank,
        ]
    );
    assert!(observer.progress_events.load(Ordering::SeqCst) > 0);
}

#[tokio::test]
async fn test_warnings_carried_into_report() {
    let (pipeline, _provider) = pipeline_with(MockEmbeddingProvider::new(DIM));
    let cancel = CancellationToken::new();

    let report = pipeline
        .run("tiny\n\nwee", &RunOptions::default(), &cancel, &NullObserver)
        .await
        .unwrap();

    assert_eq!(report.warnings, vec![ValidationWarning::AllShort]);
}

#[tokio::test]
async fn test_scripted_geometry_controls_ranking() {
    // "near" aligned with the lone reference direction, "far" orthogonal.
    let provider = MockEmbeddingProvider::new(4);
    for sentence in crate::reference::reference_sentences("en") {
        provider.script(sentence, vec![1.0, 0.0, 0.0, 0.0]);
    }
    provider.script("near the references", vec![1.0, 0.0, 0.0, 0.0]);
    provider.script("far from the references", vec![0.0, 1.0, 0.0, 0.0]);

    let (pipeline, _provider) = pipeline_with(provider);
    let cancel = CancellationToken::new();

    let report = pipeline
        .run(
            "far from the references\n\nnear the references",
            &RunOptions::default(),
            &cancel,
            &NullObserver,
        )
        .await
        .unwrap();

    assert_eq!(report.results[0].candidate.eval_text, "near the references");
    assert!((report.results[0].score - 1.0).abs() < 1e-5);
    assert_eq!(report.results[1].candidate.eval_text, "far from the references");
}
