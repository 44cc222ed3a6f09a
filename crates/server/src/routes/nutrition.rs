//! Nutrition analyzer

use axum::{
    Extension, Json,
    extract::Multipart,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::ai::{Assistant, nutrition};
use crate::error::AppError;

/// Upload size cap for meal photos
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    description: String,
}

/// POST /nutrition/analyze - Nutrition facts for a described meal
pub async fn analyze(
    Extension(assistant): Extension<Assistant>,
    Json(body): Json<AnalyzeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let description = body.description.trim();
    if description.is_empty() {
        return Err(AppError::BadRequest("description is required".to_string()));
    }
    Ok(Json(nutrition::analyze_text(&assistant, description).await))
}

/// POST /nutrition/image - Nutrition facts for an uploaded meal photo (multipart field `image`)
pub async fn analyze_image(
    Extension(assistant): Extension<Assistant>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("image") {
            continue;
        }
        let declared = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;
        if bytes.is_empty() {
            return Err(AppError::BadRequest("image is empty".to_string()));
        }

        let mime = nutrition::sniff_mime(&bytes, declared.as_deref());
        tracing::info!(size = bytes.len(), mime = %mime, "Meal image received");
        return Ok(Json(nutrition::analyze_image(&assistant, &bytes, &mime).await));
    }

    Err(AppError::BadRequest(
        "multipart field 'image' is required".to_string(),
    ))
}
