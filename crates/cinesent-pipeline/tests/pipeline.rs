//! Integration tests that load artifacts from `tests/fixtures`.

use std::path::PathBuf;

use cinesent_core::Sentiment;
use cinesent_pipeline::{ArtifactPaths, SentimentPipeline, StartupLoadError};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn paths(model: &str, vectorizer: &str) -> ArtifactPaths {
    ArtifactPaths {
        model: fixture(model),
        vectorizer: fixture(vectorizer),
        stopwords: None,
    }
}

fn load_default() -> SentimentPipeline {
    SentimentPipeline::load(&paths("model.json", "vectorizer.json"))
        .expect("fixture artifacts should load")
}

#[test]
fn tfidf_linear_pipeline_classifies_reviews() {
    let pipeline = load_default();

    let positive = pipeline.analyze("An <i>excellent</i> movie. I love it!").unwrap();
    assert_eq!(positive.cleaned, "excellent movie love");
    assert_eq!(positive.sentiment, Sentiment::Positive);

    let negative = pipeline.analyze("Terrible. A complete waste of two hours.").unwrap();
    assert_eq!(negative.sentiment, Sentiment::Negative);
}

#[test]
fn sample_review_is_normalized() {
    let pipeline = load_default();
    assert_eq!(
        pipeline.normalize("This movie was <b>great</b> and not boring at all!"),
        "movie great boring"
    );
}

#[test]
fn predict_returns_one_of_two_labels() {
    let pipeline = load_default();
    for text in ["", "movie", "great", "boring", "unknown words only", "great boring"] {
        let label = pipeline.predict(text).unwrap();
        assert!(matches!(label, Sentiment::Positive | Sentiment::Negative));
    }
}

#[test]
fn reloading_artifacts_gives_identical_predictions() {
    let first = load_default();
    let second = load_default();
    for text in ["great movie", "awful boring", "movie", "", "love terrible waste"] {
        assert_eq!(
            first.predict(text).unwrap(),
            second.predict(text).unwrap(),
            "text: {text:?}"
        );
    }
}

#[test]
fn naive_bayes_pipeline_classifies_reviews() {
    let pipeline = SentimentPipeline::load(&paths("nb_model.json", "count_vectorizer.json"))
        .expect("naive bayes fixtures should load");
    assert_eq!(
        pipeline.analyze("Great movie, loved every minute").unwrap().sentiment,
        Sentiment::Positive
    );
    assert_eq!(
        pipeline.analyze("boring and awful").unwrap().sentiment,
        Sentiment::Negative
    );
}

#[test]
fn custom_stopword_corpus_is_used() {
    let mut artifact_paths = paths("model.json", "vectorizer.json");
    artifact_paths.stopwords = Some(fixture("stopwords.txt"));
    let pipeline = SentimentPipeline::load(&artifact_paths).unwrap();
    assert_eq!(pipeline.normalize("The movie was a great FILM"), "was a great");
}

#[test]
fn empty_stopword_corpus_is_rejected() {
    let mut artifact_paths = paths("model.json", "vectorizer.json");
    artifact_paths.stopwords = Some(fixture("empty_stopwords.txt"));
    let err = SentimentPipeline::load(&artifact_paths).unwrap_err();
    assert!(matches!(err, StartupLoadError::Invalid { .. }), "got: {err:?}");
}

#[test]
fn missing_model_is_startup_error() {
    let err = SentimentPipeline::load(&paths("does_not_exist.json", "vectorizer.json"))
        .unwrap_err();
    assert!(
        matches!(err, StartupLoadError::Io { ref path, .. } if path.ends_with("does_not_exist.json")),
        "got: {err:?}"
    );
}

#[test]
fn malformed_model_is_parse_error() {
    let err = SentimentPipeline::load(&paths("malformed.json", "vectorizer.json")).unwrap_err();
    assert!(matches!(err, StartupLoadError::Parse { .. }), "got: {err:?}");
}

#[test]
fn invalid_vectorizer_is_rejected() {
    let err =
        SentimentPipeline::load(&paths("model.json", "bad_idf_vectorizer.json")).unwrap_err();
    assert!(
        matches!(err, StartupLoadError::Invalid { ref reason, .. } if reason.contains("idf")),
        "got: {err:?}"
    );
}

#[test]
fn classifier_vectorizer_dimension_mismatch_is_rejected() {
    let err = SentimentPipeline::load(&paths("narrow_model.json", "vectorizer.json")).unwrap_err();
    assert!(
        matches!(
            err,
            StartupLoadError::DimensionMismatch {
                vectorizer: 8,
                classifier: 2
            }
        ),
        "got: {err:?}"
    );
}

#[test]
fn shipped_demo_artifacts_load() {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../models");
    let pipeline = SentimentPipeline::load(&ArtifactPaths {
        model: root.join("imdb_sentiment_model.json"),
        vectorizer: root.join("imdb_vectorizer.json"),
        stopwords: None,
    })
    .expect("demo artifacts should load");
    assert_eq!(
        pipeline
            .analyze("A brilliant, moving film. Loved it.")
            .unwrap()
            .sentiment,
        Sentiment::Positive
    );
    assert_eq!(
        pipeline
            .analyze("Boring, predictable and a total waste of time.")
            .unwrap()
            .sentiment,
        Sentiment::Negative
    );
}
