use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info};

use super::types::*;
use crate::recommend::RecommendError;
use crate::server::AppState;
use crate::survey::{map_answers, validate, ValidationError};

pub const INFO_TEXT: &str = "Movie Recommendation API is running.";
const INTERNAL_ERROR: &str = "Internal Server Error";

/// Errors a request can end in. Only validation errors are shown to the
/// client; everything else becomes an opaque 500.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Malformed request body: {0}")]
    BadBody(#[from] serde_json::Error),
    #[error("Request body is JSON null")]
    NullBody,
    #[error(transparent)]
    Recommend(#[from] RecommendError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            other => {
                error!(error = %other, "Error handling recommendation request");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string())
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// `POST /api/recommend`
///
/// The body is read as raw bytes so that malformed JSON ends up on the
/// internal-error path instead of axum's own 4xx rejection.
pub async fn recommend(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RecommendResponse>, ApiError> {
    let payload: serde_json::Value = serde_json::from_slice(&body)?;
    // other non-object bodies simply have no answers and fail validation
    if payload.is_null() {
        return Err(ApiError::NullBody);
    }

    let answers = validate(&payload)?;
    let mapped = map_answers(&answers);

    let recommendation = state.recommender.recommend(&mapped).await?;
    info!(movie = %recommendation.movie, "Recommendation ready");

    Ok(Json(RecommendResponse {
        recommendations: recommendation,
    }))
}

/// Reply for every other method and path.
pub async fn info_handler() -> impl IntoResponse {
    (StatusCode::OK, INFO_TEXT)
}
