//! Review text normalization.

use std::sync::LazyLock;

use regex::Regex;

use crate::stopwords::StopwordSet;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<.*?>").expect("valid tag regex"));
static NON_LETTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z]").expect("valid non-letter regex"));

/// Clean raw review text for vectorization.
///
/// 1. Strip HTML-like tags (`<...>`, shortest match).
/// 2. Replace every non-ASCII-letter character with a space.
/// 3. Lowercase.
/// 4. Split on whitespace and drop stopwords.
/// 5. Join the remaining tokens with single spaces.
///
/// Total over all input: text with no letters, or only stopwords, yields `""`.
#[must_use]
pub fn normalize(text: &str, stopwords: &StopwordSet) -> String {
    let without_tags = TAG_RE.replace_all(text, "");
    let letters_only = NON_LETTER_RE.replace_all(&without_tags, " ");
    let lowered = letters_only.to_lowercase();

    lowered
        .split_whitespace()
        .filter(|token| !stopwords.contains(token))
        .collect::<Vec<_>>()
        .join(" ")
}
