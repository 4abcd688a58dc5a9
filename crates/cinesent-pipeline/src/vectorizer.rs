//! Fitted text vectorizers.
//!
//! Artifacts are JSON documents tagged by `kind`:
//!
//! ```json
//! { "kind": "count", "vocabulary": { "great": 0, "boring": 1 }, "ngram_range": [1, 2] }
//! { "kind": "tfidf", "vocabulary": { "great": 0 }, "idf": [1.7], "norm": "l2" }
//! ```
//!
//! Both produce a dense vector with one column per vocabulary entry.

use std::collections::HashMap;

use regex::Regex;
use serde::Deserialize;

use crate::error::InferenceError;

/// Maps cleaned text to a fixed-length feature vector.
pub trait Vectorizer: Send + Sync {
    /// Length of every vector returned by [`Vectorizer::transform`].
    fn n_features(&self) -> usize;

    /// # Errors
    ///
    /// Returns [`InferenceError`] if the text cannot be vectorized.
    fn transform(&self, text: &str) -> Result<Vec<f64>, InferenceError>;
}

const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_true() -> bool {
    true
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum VectorizerSpec {
    Count(CountSpec),
    Tfidf(TfidfSpec),
}

#[derive(Debug, Deserialize)]
pub(crate) struct CountSpec {
    vocabulary: HashMap<String, usize>,
    #[serde(default = "default_ngram_range")]
    ngram_range: (usize, usize),
    #[serde(default)]
    binary: bool,
    #[serde(default)]
    token_pattern: Option<String>,
    #[serde(default = "default_true")]
    lowercase: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TfidfSpec {
    #[serde(flatten)]
    counts: CountSpec,
    idf: Vec<f64>,
    #[serde(default = "default_norm")]
    norm: Option<Norm>,
    #[serde(default)]
    sublinear_tf: bool,
}

impl VectorizerSpec {
    /// Validate the parsed document and build the runtime vectorizer.
    pub(crate) fn build(self) -> Result<Box<dyn Vectorizer>, String> {
        Ok(match self {
            VectorizerSpec::Count(spec) => Box::new(CountVectorizer::from_spec(spec)?),
            VectorizerSpec::Tfidf(spec) => Box::new(TfidfVectorizer::from_spec(spec)?),
        })
    }
}

/// Term-count vectorizer over a fixed vocabulary.
#[derive(Debug, Clone)]
pub struct CountVectorizer {
    vocabulary: HashMap<String, usize>,
    ngram_range: (usize, usize),
    binary: bool,
    lowercase: bool,
    token_pattern: Regex,
}

impl CountVectorizer {
    /// Build a unigram count vectorizer with the default token pattern.
    ///
    /// # Errors
    ///
    /// Returns a reason string if the vocabulary columns are not exactly `0..len`.
    pub fn new(vocabulary: HashMap<String, usize>) -> Result<Self, String> {
        Self::from_spec(CountSpec {
            vocabulary,
            ngram_range: default_ngram_range(),
            binary: false,
            token_pattern: None,
            lowercase: true,
        })
    }

    fn from_spec(spec: CountSpec) -> Result<Self, String> {
        if spec.vocabulary.is_empty() {
            return Err("vocabulary is empty".to_string());
        }
        validate_columns(&spec.vocabulary)?;

        let (min_n, max_n) = spec.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(format!("invalid ngram_range ({min_n}, {max_n})"));
        }

        let pattern = spec.token_pattern.as_deref().unwrap_or(DEFAULT_TOKEN_PATTERN);
        let token_pattern =
            Regex::new(pattern).map_err(|e| format!("invalid token_pattern: {e}"))?;

        Ok(Self {
            vocabulary: spec.vocabulary,
            ngram_range: spec.ngram_range,
            binary: spec.binary,
            lowercase: spec.lowercase,
            token_pattern,
        })
    }

    /// Split text into tokens and word n-grams, in the order they are counted.
    fn analyze(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        // A pattern with a capture group tokenizes on the group, not the whole match.
        let tokens: Vec<&str> = if self.token_pattern.captures_len() > 1 {
            self.token_pattern
                .captures_iter(&text)
                .filter_map(|c| c.get(1).map(|m| m.as_str()))
                .collect()
        } else {
            self.token_pattern
                .find_iter(&text)
                .map(|m| m.as_str())
                .collect()
        };

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n.min(tokens.len()) {
            terms.extend(tokens.windows(n).map(|w| w.join(" ")));
        }
        terms
    }

    fn counts(&self, text: &str) -> Vec<f64> {
        let mut vector = vec![0.0; self.vocabulary.len()];
        for term in self.analyze(text) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                if self.binary {
                    vector[idx] = 1.0;
                } else {
                    vector[idx] += 1.0;
                }
            }
        }
        vector
    }
}

impl Vectorizer for CountVectorizer {
    fn n_features(&self) -> usize {
        self.vocabulary.len()
    }

    fn transform(&self, text: &str) -> Result<Vec<f64>, InferenceError> {
        Ok(self.counts(text))
    }
}

/// Count vectorizer reweighted by inverse document frequency.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    counts: CountVectorizer,
    idf: Vec<f64>,
    norm: Option<Norm>,
    sublinear_tf: bool,
}

impl TfidfVectorizer {
    fn from_spec(spec: TfidfSpec) -> Result<Self, String> {
        let counts = CountVectorizer::from_spec(spec.counts)?;

        if spec.idf.len() != counts.n_features() {
            return Err(format!(
                "idf has {} weights but vocabulary has {} terms",
                spec.idf.len(),
                counts.n_features()
            ));
        }
        if let Some(i) = spec.idf.iter().position(|w| !w.is_finite()) {
            return Err(format!("idf weight at column {i} is not finite"));
        }

        Ok(Self {
            counts,
            idf: spec.idf,
            norm: spec.norm,
            sublinear_tf: spec.sublinear_tf,
        })
    }
}

impl Vectorizer for TfidfVectorizer {
    fn n_features(&self) -> usize {
        self.idf.len()
    }

    fn transform(&self, text: &str) -> Result<Vec<f64>, InferenceError> {
        let mut vector = self.counts.counts(text);

        for (value, idf) in vector.iter_mut().zip(&self.idf) {
            if *value > 0.0 {
                let tf = if self.sublinear_tf {
                    value.ln() + 1.0
                } else {
                    *value
                };
                *value = tf * idf;
            }
        }

        let length = match self.norm {
            Some(Norm::L2) => vector.iter().map(|v| v * v).sum::<f64>().sqrt(),
            Some(Norm::L1) => vector.iter().map(|v| v.abs()).sum::<f64>(),
            None => 0.0,
        };
        if length > 0.0 {
            for value in &mut vector {
                *value /= length;
            }
        }

        Ok(vector)
    }
}

/// Columns must be a permutation of `0..vocabulary.len()`.
fn validate_columns(vocabulary: &HashMap<String, usize>) -> Result<(), String> {
    let mut seen = vec![false; vocabulary.len()];
    for (term, &idx) in vocabulary {
        match seen.get_mut(idx) {
            None => {
                return Err(format!(
                    "term '{term}' maps to column {idx}, outside vocabulary of {} terms",
                    vocabulary.len()
                ))
            }
            Some(true) => return Err(format!("column {idx} is assigned to more than one term")),
            Some(slot) => *slot = true,
        }
    }
    Ok(())
}
