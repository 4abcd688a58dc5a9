//! Startup loading of the trained artifacts.

use std::path::{Path, PathBuf};

use cinesent_core::AppConfig;
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};

use crate::classifier::{Classifier, ClassifierSpec};
use crate::error::StartupLoadError;
use crate::stopwords::StopwordSet;
use crate::vectorizer::{Vectorizer, VectorizerSpec};

/// Locations of the artifacts read at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub vectorizer: PathBuf,
    /// `None` uses the embedded English stopword corpus.
    pub stopwords: Option<PathBuf>,
}

impl ArtifactPaths {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            model: config.model_path.clone(),
            vectorizer: config.vectorizer_path.clone(),
            stopwords: config.stopwords_path.clone(),
        }
    }
}

pub(crate) fn load_stopwords(path: Option<&Path>) -> Result<StopwordSet, StartupLoadError> {
    match path {
        Some(path) => StopwordSet::from_file(path),
        None => Ok(StopwordSet::english()),
    }
}

pub(crate) fn load_vectorizer(path: &Path) -> Result<Box<dyn Vectorizer>, StartupLoadError> {
    let spec: VectorizerSpec = read_json(path)?;
    let vectorizer = spec.build().map_err(|reason| invalid(path, reason))?;
    tracing::info!(
        path = %path.display(),
        features = vectorizer.n_features(),
        "loaded vectorizer"
    );
    Ok(vectorizer)
}

pub(crate) fn load_classifier(path: &Path) -> Result<Box<dyn Classifier>, StartupLoadError> {
    let spec: ClassifierSpec = read_json(path)?;
    let classifier = spec.build().map_err(|reason| invalid(path, reason))?;
    tracing::info!(
        path = %path.display(),
        features = classifier.n_features(),
        "loaded classifier"
    );
    Ok(classifier)
}

/// Read and parse a JSON artifact, logging its SHA-256 fingerprint.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StartupLoadError> {
    let bytes = std::fs::read(path).map_err(|e| StartupLoadError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    tracing::info!(
        path = %path.display(),
        sha256 = %fingerprint(&bytes),
        bytes = bytes.len(),
        "read artifact"
    );

    serde_json::from_slice(&bytes).map_err(|e| StartupLoadError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}

/// Lowercase hex SHA-256 of an artifact's bytes.
#[must_use]
pub fn fingerprint(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

fn invalid(path: &Path, reason: String) -> StartupLoadError {
    StartupLoadError::Invalid {
        path: path.display().to_string(),
        reason,
    }
}
