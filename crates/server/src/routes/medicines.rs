//! AI medicine dashboard over the session's medicine list

use axum::{
    Extension, Json,
    http::{StatusCode, header},
    response::IntoResponse,
};
use nutri_core::models::medicine::{MAX_DURATION_DAYS, Medicine};

use super::today;
use crate::ai::{Assistant, medicine};
use crate::error::AppError;
use crate::session::{SessionContext, SessionError, SessionStore};

/// GET /medicines - The session's medicine list
pub async fn list(Extension(session): Extension<SessionContext>) -> impl IntoResponse {
    Json(session.medicines)
}

/// POST /medicines - Add a medicine to the session list
pub async fn add(
    Extension(sessions): Extension<SessionStore>,
    Extension(session): Extension<SessionContext>,
    Json(mut body): Json<Medicine>,
) -> Result<impl IntoResponse, AppError> {
    body.name = body.name.trim().to_string();
    if body.name.is_empty() {
        return Err(AppError::BadRequest("medicine name is required".to_string()));
    }
    if !body.duration_in_range() {
        return Err(AppError::BadRequest(format!(
            "duration must be at most {MAX_DURATION_DAYS} days"
        )));
    }

    let medicines = sessions
        .add_medicine(&session.token, body)
        .await
        .map_err(|e| match e {
            SessionError::Expired => AppError::Unauthorized(e.to_string()),
            SessionError::MedicineLimit => AppError::BadRequest(e.to_string()),
        })?;
    Ok((StatusCode::CREATED, Json(medicines)))
}

/// DELETE /medicines - Clear the session list
pub async fn clear(
    Extension(sessions): Extension<SessionStore>,
    Extension(session): Extension<SessionContext>,
) -> impl IntoResponse {
    sessions.clear_medicines(&session.token).await;
    StatusCode::NO_CONTENT
}

/// GET /medicines/dashboard - Per-medicine info, interactions and chart data
pub async fn dashboard(
    Extension(assistant): Extension<Assistant>,
    Extension(session): Extension<SessionContext>,
) -> impl IntoResponse {
    Json(medicine::dashboard(&assistant, &session.medicines, today()).await)
}

/// GET /medicines/export - The dashboard summary as a text download
pub async fn export(
    Extension(assistant): Extension<Assistant>,
    Extension(session): Extension<SessionContext>,
) -> impl IntoResponse {
    let dashboard = medicine::dashboard(&assistant, &session.medicines, today()).await;
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"medicine_summary.txt\"",
            ),
        ],
        dashboard.summary,
    )
}
