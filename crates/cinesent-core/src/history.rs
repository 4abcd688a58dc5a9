//! Per-session prediction history.
//!
//! Records are append-only and never mutated. When a limit is configured
//! the oldest records are evicted first; otherwise the log grows for the
//! lifetime of the session.

use std::collections::VecDeque;
use std::num::NonZeroUsize;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::sentiment::Sentiment;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistoryError {
    #[error("no review record with id {0}")]
    UnknownRecord(u64),
}

/// One successful prediction.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReviewRecord {
    pub id: u64,
    /// Title of the movie the review was written for.
    pub movie: String,
    /// Review text exactly as the user entered it.
    pub review: String,
    pub sentiment: Sentiment,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackVerdict {
    Correct,
    Incorrect,
}

impl FeedbackVerdict {
    #[must_use]
    pub fn from_correct(correct: bool) -> Self {
        if correct {
            FeedbackVerdict::Correct
        } else {
            FeedbackVerdict::Incorrect
        }
    }
}

/// The user's verdict on a single prediction.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Feedback {
    pub record_id: u64,
    pub verdict: FeedbackVerdict,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct SessionHistory {
    records: VecDeque<ReviewRecord>,
    feedback: Vec<Feedback>,
    limit: Option<NonZeroUsize>,
    next_id: u64,
}

impl Default for SessionHistory {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SessionHistory {
    #[must_use]
    pub fn new(limit: Option<NonZeroUsize>) -> Self {
        Self {
            records: VecDeque::new(),
            feedback: Vec::new(),
            limit,
            next_id: 1,
        }
    }

    /// Append a new record and return a copy of it.
    pub fn record(
        &mut self,
        movie: impl Into<String>,
        review: impl Into<String>,
        sentiment: Sentiment,
    ) -> ReviewRecord {
        let record = ReviewRecord {
            id: self.next_id,
            movie: movie.into(),
            review: review.into(),
            sentiment,
            recorded_at: Utc::now(),
        };
        self.next_id += 1;
        self.records.push_back(record.clone());

        if let Some(limit) = self.limit {
            while self.records.len() > limit.get() {
                if let Some(evicted) = self.records.pop_front() {
                    tracing::debug!(id = evicted.id, "history limit reached, evicting record");
                }
            }
        }

        record
    }

    /// Attach feedback to a record still held in history.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::UnknownRecord`] if no record with `record_id` is held.
    pub fn add_feedback(
        &mut self,
        record_id: u64,
        verdict: FeedbackVerdict,
    ) -> Result<Feedback, HistoryError> {
        if !self.records.iter().any(|r| r.id == record_id) {
            return Err(HistoryError::UnknownRecord(record_id));
        }

        let entry = Feedback {
            record_id,
            verdict,
            recorded_at: Utc::now(),
        };
        self.feedback.push(entry.clone());
        Ok(entry)
    }

    /// Records in display order: most recent first.
    pub fn newest_first(&self) -> impl Iterator<Item = &ReviewRecord> {
        self.records.iter().rev()
    }

    #[must_use]
    pub fn feedback(&self) -> &[Feedback] {
        &self.feedback
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
