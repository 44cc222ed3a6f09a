//! AI diet planner

use axum::{Extension, Json, response::IntoResponse};
use serde::Deserialize;

use crate::ai::{Assistant, diet};
use crate::error::AppError;

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct DietRequest {
    breakfast: String,
    lunch: String,
    dinner: String,
}

/// POST /diet/analyze - Analyze each entered meal and total the day
pub async fn analyze(
    Extension(assistant): Extension<Assistant>,
    Json(body): Json<DietRequest>,
) -> Result<impl IntoResponse, AppError> {
    let meals = [
        ("breakfast", body.breakfast.as_str()),
        ("lunch", body.lunch.as_str()),
        ("dinner", body.dinner.as_str()),
    ];
    if meals.iter().all(|(_, text)| text.trim().is_empty()) {
        return Err(AppError::BadRequest(
            "enter at least one of breakfast, lunch or dinner".to_string(),
        ));
    }
    Ok(Json(diet::analyze_day(&assistant, &meals).await))
}
