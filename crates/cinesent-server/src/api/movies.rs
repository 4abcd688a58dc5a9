use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use cinesent_core::Category;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct MoviesQuery {
    pub category: Option<String>,
}

pub(super) async fn list_movies(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<MoviesQuery>,
) -> Result<Json<ApiResponse<Vec<Category>>>, ApiError> {
    let data = match query.category.as_deref() {
        Some(name) => {
            let category = state.catalog.category(name).ok_or_else(|| {
                ApiError::new(
                    req_id.0.clone(),
                    "not_found",
                    format!(
                        "category '{name}' not found; choose one of: {}",
                        state.catalog.category_names().join(", ")
                    ),
                )
            })?;
            vec![category.clone()]
        }
        None => state.catalog.categories.clone(),
    };

    Ok(Json(ApiResponse::new(req_id.0, data)))
}
