//! AI health assistant

use axum::{Extension, Json, response::IntoResponse};
use serde::Deserialize;

use crate::ai::{Assistant, health};
use crate::error::AppError;

#[derive(Deserialize)]
pub struct AskRequest {
    question: String,
}

/// POST /assistant/ask - Answer plus tips and tip-word frequencies
pub async fn ask(
    Extension(assistant): Extension<Assistant>,
    Json(body): Json<AskRequest>,
) -> Result<impl IntoResponse, AppError> {
    let question = body.question.trim();
    if question.is_empty() {
        return Err(AppError::BadRequest("question is required".to_string()));
    }
    Ok(Json(health::answer(&assistant, question).await))
}
