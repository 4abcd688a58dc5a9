//! One-shot `predict` command.

use std::io::Read;

use cinesent_pipeline::SentimentPipeline;

/// Classify one review and print the label.
///
/// # Errors
///
/// Returns an error if the review is empty, stdin cannot be read, or inference fails.
pub(crate) fn run_predict(
    pipeline: &SentimentPipeline,
    movie: &str,
    text: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let review = match text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    println!("{}", classify(pipeline, movie, &review, json)?);
    Ok(())
}

/// Validate, classify, and render a single review.
pub(crate) fn classify(
    pipeline: &SentimentPipeline,
    movie: &str,
    review: &str,
    json: bool,
) -> anyhow::Result<String> {
    if review.trim().is_empty() {
        anyhow::bail!("please enter a review before predicting");
    }

    let analysis = pipeline.analyze(review).map_err(|e| {
        tracing::error!(movie, error = %e, "inference failed");
        anyhow::anyhow!("could not compute sentiment: {e}")
    })?;
    tracing::info!(movie, sentiment = %analysis.sentiment, "review classified");

    Ok(if json {
        serde_json::json!({
            "movie": movie,
            "sentiment": analysis.sentiment,
            "cleaned": analysis.cleaned,
        })
        .to_string()
    } else {
        format!("Sentiment for '{movie}': {}", analysis.sentiment)
    })
}
