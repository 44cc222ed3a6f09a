//! Nearby hospital finder

use axum::{Extension, Json, response::IntoResponse};
use serde::Deserialize;

use crate::ai::{Assistant, hospitals};
use crate::error::AppError;

#[derive(Deserialize)]
pub struct SearchRequest {
    location: String,
}

/// POST /hospitals/search
pub async fn search(
    Extension(assistant): Extension<Assistant>,
    Json(body): Json<SearchRequest>,
) -> Result<impl IntoResponse, AppError> {
    let location = body.location.trim();
    if location.is_empty() {
        return Err(AppError::BadRequest("location is required".to_string()));
    }
    Ok(Json(hospitals::find(&assistant, location).await))
}
