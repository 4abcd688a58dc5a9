//! Interactive review session.
//!
//! Reads one review per line, prints the predicted label, asks whether the
//! prediction was right, and keeps an in-memory history for the session.

use std::io::{BufRead, Write};

use cinesent_core::{AppConfig, FeedbackVerdict, MovieCatalog, SessionHistory};
use cinesent_pipeline::SentimentPipeline;

use crate::catalog::{poster_line, resolve_category, resolve_movie};

const HELP: &str = "\
commands:
  :movie <title>   switch the movie being reviewed
  :movies          list selectable movies
  :history         show prediction history
  :help            show this message
  :quit            leave the session
anything else is treated as a review";

pub(crate) struct Session<'a> {
    pipeline: &'a SentimentPipeline,
    catalog: &'a MovieCatalog,
    category: Option<String>,
    movie: String,
    history: SessionHistory,
}

impl<'a> Session<'a> {
    /// Start a session on `movie`, or the first title of the chosen (or first) category.
    pub(crate) fn new(
        pipeline: &'a SentimentPipeline,
        catalog: &'a MovieCatalog,
        history: SessionHistory,
        category: Option<String>,
        movie: Option<String>,
    ) -> anyhow::Result<Self> {
        let movie = match movie.as_deref() {
            Some(title) => resolve_movie(catalog, category.as_deref(), title)?
                .title
                .clone(),
            None => {
                let category = match category.as_deref() {
                    Some(name) => resolve_category(catalog, name)?,
                    None => catalog
                        .categories
                        .first()
                        .ok_or_else(|| anyhow::anyhow!("movie catalog is empty"))?,
                };
                category
                    .movies
                    .first()
                    .map(|m| m.title.clone())
                    .ok_or_else(|| anyhow::anyhow!("category '{}' is empty", category.name))?
            }
        };

        Ok(Self {
            pipeline,
            catalog,
            category,
            movie,
            history,
        })
    }

    /// Drive the session until `:quit` or end of input.
    pub(crate) fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> anyhow::Result<()> {
        let mut lines = input.lines();
        self.announce_movie(out)?;

        loop {
            write!(out, "review for '{}' (:help for commands)> ", self.movie)?;
            out.flush()?;

            let Some(review) = lines.next().transpose()? else {
                writeln!(out)?;
                break;
            };

            // Commands and emptiness are judged on the trimmed line; the
            // review itself is recorded as typed.
            if let Some(command) = review.trim().strip_prefix(':') {
                if !self.handle_command(command, out)? {
                    break;
                }
                continue;
            }

            if review.trim().is_empty() {
                writeln!(out, "Please enter a review before predicting.")?;
                continue;
            }

            let Some(record_id) = self.predict(&review, out)? else {
                continue;
            };

            write!(out, "Was the prediction correct? [y/n] ")?;
            out.flush()?;
            let answer = lines.next().transpose()?.unwrap_or_default();
            if let Some(command) = answer.trim().strip_prefix(':') {
                writeln!(out, "No feedback recorded.")?;
                if !self.handle_command(command, out)? {
                    break;
                }
                continue;
            }
            self.record_feedback(record_id, &answer, out)?;
            self.print_history(out)?;
        }

        tracing::info!(
            records = self.history.len(),
            feedback = self.history.feedback().len(),
            "session ended"
        );
        Ok(())
    }

    /// Classify one review; returns the new record id, or `None` if inference failed.
    fn predict<W: Write>(&mut self, review: &str, out: &mut W) -> anyhow::Result<Option<u64>> {
        match self.pipeline.analyze(review) {
            Ok(analysis) => {
                let record = self
                    .history
                    .record(self.movie.clone(), review, analysis.sentiment);
                tracing::info!(
                    movie = %record.movie,
                    sentiment = %record.sentiment,
                    id = record.id,
                    "review classified"
                );
                writeln!(out, "Sentiment for '{}': {}", record.movie, record.sentiment)?;
                Ok(Some(record.id))
            }
            Err(e) => {
                tracing::error!(movie = %self.movie, error = %e, "inference failed");
                writeln!(out, "Could not compute sentiment: {e}")?;
                Ok(None)
            }
        }
    }

    fn record_feedback<W: Write>(
        &mut self,
        record_id: u64,
        answer: &str,
        out: &mut W,
    ) -> anyhow::Result<()> {
        let verdict = match answer.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => FeedbackVerdict::Correct,
            "n" | "no" => FeedbackVerdict::Incorrect,
            _ => {
                writeln!(out, "No feedback recorded.")?;
                return Ok(());
            }
        };

        self.history.add_feedback(record_id, verdict)?;
        let label = match verdict {
            FeedbackVerdict::Correct => "yes",
            FeedbackVerdict::Incorrect => "no",
        };
        writeln!(out, "Thanks for your feedback: {label}")?;
        Ok(())
    }

    /// Returns `false` when the session should end.
    fn handle_command<W: Write>(&mut self, command: &str, out: &mut W) -> anyhow::Result<bool> {
        let (name, arg) = command
            .split_once(char::is_whitespace)
            .map_or((command, ""), |(n, a)| (n, a.trim()));

        match name {
            "quit" | "q" => return Ok(false),
            "help" => writeln!(out, "{HELP}")?,
            "history" => self.print_history(out)?,
            "movies" => crate::catalog::print_catalog(self.catalog, self.category.as_deref(), out)?,
            "movie" if arg.is_empty() => writeln!(out, "usage: :movie <title>")?,
            "movie" => match resolve_movie(self.catalog, self.category.as_deref(), arg) {
                Ok(movie) => {
                    self.movie.clone_from(&movie.title);
                    self.announce_movie(out)?;
                }
                Err(e) => writeln!(out, "{e}")?,
            },
            other => writeln!(out, "unknown command ':{other}'; try :help")?,
        }
        Ok(true)
    }

    fn announce_movie<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        let line = resolve_movie(self.catalog, self.category.as_deref(), &self.movie)
            .map_or_else(|_| "poster not available".to_string(), poster_line);
        writeln!(out, "Now reviewing '{}' ({line})", self.movie)?;
        Ok(())
    }

    fn print_history<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        if self.history.is_empty() {
            writeln!(out, "No predictions yet.")?;
            return Ok(());
        }

        writeln!(out, "---- prediction history ----")?;
        for record in self.history.newest_first() {
            writeln!(
                out,
                "{} | {} | {}",
                record.recorded_at.format("%Y-%m-%d %H:%M:%S"),
                record.movie,
                record.sentiment
            )?;
            writeln!(out, "  review: {}", record.review)?;
        }
        writeln!(out, "----------------------------")?;
        Ok(())
    }
}

/// Run a session over stdin and stdout.
pub(crate) fn run_interactive(
    pipeline: &SentimentPipeline,
    catalog: &MovieCatalog,
    config: &AppConfig,
    category: Option<String>,
    movie: Option<String>,
) -> anyhow::Result<()> {
    let history = SessionHistory::new(config.history_limit);
    let mut session = Session::new(pipeline, catalog, history, category, movie)?;
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    session.run(stdin.lock(), &mut stdout)
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
