use thiserror::Error;

/// An artifact could not be loaded at process start. Always fatal.
#[derive(Debug, Error)]
pub enum StartupLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid artifact {path}: {reason}")]
    Invalid { path: String, reason: String },

    #[error("vectorizer produces {vectorizer} features but classifier expects {classifier}")]
    DimensionMismatch { vectorizer: usize, classifier: usize },
}

/// The vectorizer or classifier failed on a single request.
#[derive(Debug, Error, PartialEq)]
pub enum InferenceError {
    #[error("feature vector has {got} dimensions, expected {expected}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("classifier produced a non-finite score")]
    NonFiniteScore,

    #[error("classifier has no classes to choose from")]
    NoClasses,
}
