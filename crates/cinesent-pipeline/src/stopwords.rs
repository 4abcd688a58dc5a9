use std::collections::HashSet;
use std::path::Path;

use crate::error::StartupLoadError;

/// NLTK English stopword corpus, one word per line.
const ENGLISH: &str = include_str!("words/english");

/// Immutable set of lowercase stopwords.
#[derive(Debug, Clone)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// The embedded English corpus.
    #[must_use]
    pub fn english() -> Self {
        Self::from_corpus(ENGLISH)
    }

    /// Load a replacement corpus: one word per line, blank lines and `#` comments skipped.
    ///
    /// # Errors
    ///
    /// Returns [`StartupLoadError`] if the file is unreadable or contains no words.
    pub fn from_file(path: &Path) -> Result<Self, StartupLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| StartupLoadError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        let set = Self::from_corpus(&content);
        if set.is_empty() {
            return Err(StartupLoadError::Invalid {
                path: path.display().to_string(),
                reason: "stopword corpus contains no words".to_string(),
            });
        }

        tracing::info!(path = %path.display(), words = set.len(), "loaded stopword corpus");
        Ok(set)
    }

    fn from_corpus(corpus: &str) -> Self {
        let words = corpus
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(str::to_lowercase)
            .collect();
        Self { words }
    }

    /// `word` must already be lowercase.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for StopwordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_corpus_has_nltk_size() {
        assert_eq!(StopwordSet::english().len(), 179);
    }

    #[test]
    fn english_contains_common_words() {
        let set = StopwordSet::english();
        for word in ["the", "and", "not", "this", "was", "all", "at"] {
            assert!(set.contains(word), "expected stopword: {word}");
        }
        assert!(!set.contains("movie"));
        assert!(!set.contains("great"));
    }

    #[test]
    fn corpus_skips_comments_and_blank_lines() {
        let set = StopwordSet::from_corpus("# header\n\n  The \nfilm\n");
        assert_eq!(set.len(), 2);
        assert!(set.contains("the"));
        assert!(set.contains("film"));
    }

    #[test]
    fn from_iter_lowercases() {
        let set: StopwordSet = ["Movie", " FILM "].into_iter().collect();
        assert!(set.contains("movie"));
        assert!(set.contains("film"));
    }

    #[test]
    fn from_file_missing_is_io_error() {
        let err = StopwordSet::from_file(Path::new("/nonexistent/english")).unwrap_err();
        assert!(matches!(err, StartupLoadError::Io { .. }));
    }
}
