use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use cinesent_core::{Feedback, FeedbackVerdict, HistoryError, ReviewRecord};

use crate::middleware::RequestId;

use super::{ApiError, ApiJson, ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub(super) struct HistoryItem {
    #[serde(flatten)]
    pub record: ReviewRecord,
    /// Latest verdict given for this record, if any.
    pub feedback: Option<FeedbackVerdict>,
}

#[derive(Debug, Deserialize)]
pub(super) struct FeedbackRequest {
    pub correct: bool,
}

pub(super) async fn list_history(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<HistoryItem>>> {
    let history = state.history.lock().await;
    let data: Vec<HistoryItem> = history
        .newest_first()
        .map(|record| HistoryItem {
            feedback: history
                .feedback()
                .iter()
                .rev()
                .find(|f| f.record_id == record.id)
                .map(|f| f.verdict),
            record: record.clone(),
        })
        .collect();
    drop(history);

    Json(ApiResponse::new(req_id.0, data))
}

pub(super) async fn submit_feedback(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<u64>,
    ApiJson(body): ApiJson<FeedbackRequest>,
) -> Result<Json<ApiResponse<Feedback>>, ApiError> {
    let verdict = FeedbackVerdict::from_correct(body.correct);
    let feedback = state
        .history
        .lock()
        .await
        .add_feedback(id, verdict)
        .map_err(|e| match e {
            HistoryError::UnknownRecord(_) => {
                ApiError::new(req_id.0.clone(), "not_found", e.to_string())
            }
        })?;
    tracing::info!(id, ?verdict, "feedback recorded");

    Ok(Json(ApiResponse::new(req_id.0, feedback)))
}
