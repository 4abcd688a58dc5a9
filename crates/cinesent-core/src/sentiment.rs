use serde::{Deserialize, Serialize};

/// Binary sentiment label produced by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
}

impl Sentiment {
    /// Map a raw classifier class to a label.
    ///
    /// Class `1` is positive; every other class is negative.
    #[must_use]
    pub fn from_class(class: i64) -> Self {
        if class == 1 {
            Sentiment::Positive
        } else {
            Sentiment::Negative
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "Positive"),
            Sentiment::Negative => write!(f, "Negative"),
        }
    }
}
