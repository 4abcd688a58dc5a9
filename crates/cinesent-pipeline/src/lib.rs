//! Review sentiment pipeline.
//!
//! Normalizes raw review text, turns it into a feature vector with a fitted
//! vectorizer, and classifies it with a trained binary model. Artifacts are
//! loaded once at startup and shared read-only for the process lifetime.

pub mod artifacts;
pub mod classifier;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod stopwords;
pub mod vectorizer;

pub use artifacts::ArtifactPaths;
pub use classifier::{Classifier, LinearClassifier, MultinomialNb};
pub use error::{InferenceError, StartupLoadError};
pub use normalize::normalize;
pub use pipeline::{Analysis, SentimentPipeline};
pub use stopwords::StopwordSet;
pub use vectorizer::{CountVectorizer, TfidfVectorizer, Vectorizer};
