//! Sentiment pipeline: normalize, vectorize, classify, label.

use cinesent_core::Sentiment;

use crate::artifacts::{load_classifier, load_stopwords, load_vectorizer, ArtifactPaths};
use crate::classifier::Classifier;
use crate::error::{InferenceError, StartupLoadError};
use crate::normalize::normalize;
use crate::stopwords::StopwordSet;
use crate::vectorizer::Vectorizer;

/// Result of running raw review text through the full pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub cleaned: String,
    pub sentiment: Sentiment,
}

/// Immutable bundle of stopwords, vectorizer and classifier.
///
/// Nothing here is mutated after construction; share it behind an `Arc`.
pub struct SentimentPipeline {
    stopwords: StopwordSet,
    vectorizer: Box<dyn Vectorizer>,
    classifier: Box<dyn Classifier>,
}

impl std::fmt::Debug for SentimentPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentPipeline")
            .field("stopwords", &self.stopwords.len())
            .field("features", &self.vectorizer.n_features())
            .finish_non_exhaustive()
    }
}

impl SentimentPipeline {
    /// Assemble a pipeline from already-loaded parts.
    ///
    /// # Errors
    ///
    /// Returns [`StartupLoadError::DimensionMismatch`] if the classifier does not
    /// accept the vectorizer's output length.
    pub fn new(
        stopwords: StopwordSet,
        vectorizer: Box<dyn Vectorizer>,
        classifier: Box<dyn Classifier>,
    ) -> Result<Self, StartupLoadError> {
        if vectorizer.n_features() != classifier.n_features() {
            return Err(StartupLoadError::DimensionMismatch {
                vectorizer: vectorizer.n_features(),
                classifier: classifier.n_features(),
            });
        }

        Ok(Self {
            stopwords,
            vectorizer,
            classifier,
        })
    }

    /// Load every artifact from disk. Intended to run once at process start.
    ///
    /// # Errors
    ///
    /// Returns [`StartupLoadError`] if any artifact is missing, unreadable or invalid.
    pub fn load(paths: &ArtifactPaths) -> Result<Self, StartupLoadError> {
        let stopwords = load_stopwords(paths.stopwords.as_deref())?;
        let vectorizer = load_vectorizer(&paths.vectorizer)?;
        let classifier = load_classifier(&paths.model)?;
        Self::new(stopwords, vectorizer, classifier)
    }

    /// See [`crate::normalize::normalize`].
    #[must_use]
    pub fn normalize(&self, text: &str) -> String {
        normalize(text, &self.stopwords)
    }

    /// Classify already-normalized text.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError`] if the vectorizer or classifier fails.
    pub fn predict(&self, cleaned: &str) -> Result<Sentiment, InferenceError> {
        let features = self.vectorizer.transform(cleaned)?;
        let class = self.classifier.predict(&features)?;
        Ok(Sentiment::from_class(class))
    }

    /// Normalize then classify raw review text.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError`] if the vectorizer or classifier fails.
    pub fn analyze(&self, raw: &str) -> Result<Analysis, InferenceError> {
        let cleaned = self.normalize(raw);
        let sentiment = self.predict(&cleaned)?;
        tracing::debug!(
            raw_chars = raw.len(),
            tokens = cleaned.split_whitespace().count(),
            %sentiment,
            "classified review"
        );
        Ok(Analysis { cleaned, sentiment })
    }
}
