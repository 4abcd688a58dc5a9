use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use cinesent_core::ReviewRecord;

use crate::middleware::RequestId;

use super::{ApiError, ApiJson, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct PredictRequest {
    pub movie: String,
    pub review: String,
}

#[derive(Debug, Serialize)]
pub(super) struct PredictResponse {
    #[serde(flatten)]
    pub record: ReviewRecord,
    /// Normalized text the classifier actually saw.
    pub cleaned: String,
}

pub(super) async fn predict_review(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    ApiJson(body): ApiJson<PredictRequest>,
) -> Result<Json<ApiResponse<PredictResponse>>, ApiError> {
    if body.review.trim().is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "please enter a review before predicting",
        ));
    }

    let Some((_, movie)) = state.catalog.find_movie(&body.movie) else {
        return Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("movie '{}' not found", body.movie.trim()),
        ));
    };

    let analysis = state.pipeline.analyze(&body.review).map_err(|e| {
        tracing::error!(movie = %movie.title, error = %e, "inference failed");
        ApiError::new(
            req_id.0.clone(),
            "inference_error",
            "could not compute sentiment",
        )
    })?;

    let record = state
        .history
        .lock()
        .await
        .record(movie.title.clone(), body.review, analysis.sentiment);
    tracing::info!(
        id = record.id,
        movie = %record.movie,
        sentiment = %record.sentiment,
        "review classified"
    );

    Ok(Json(ApiResponse::new(
        req_id.0,
        PredictResponse {
            record,
            cleaned: analysis.cleaned,
        },
    )))
}
