//! Exercise videos and the workout streak

use axum::{Extension, Json, extract::State, response::IntoResponse};
use deadpool_postgres::Pool;
use nutri_core::models::exercise::{
    MAX_DURATION_MINUTES, MIN_DURATION_MINUTES, StreakSummary, WorkoutType,
};
use serde::{Deserialize, Serialize};

use super::today;
use crate::ai::{Assistant, exercise};
use crate::db::StreakRepository;
use crate::error::AppError;
use crate::session::SessionContext;

#[derive(Deserialize)]
pub struct VideosRequest {
    #[serde(default)]
    workout_type: WorkoutType,
    duration: u32,
}

#[derive(Serialize)]
pub struct MarkResponse {
    newly_marked: bool,
    streak: StreakSummary,
}

/// POST /exercise/videos - Three videos for the workout type and duration
pub async fn videos(
    Extension(assistant): Extension<Assistant>,
    Json(body): Json<VideosRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&body.duration) {
        return Err(AppError::BadRequest(format!(
            "duration must be between {} and {} minutes",
            MIN_DURATION_MINUTES, MAX_DURATION_MINUTES
        )));
    }
    Ok(Json(
        exercise::recommend(&assistant, body.workout_type, body.duration).await,
    ))
}

/// GET /exercise/streak
pub async fn streak(
    State(pool): State<Pool>,
    Extension(session): Extension<SessionContext>,
) -> Result<impl IntoResponse, AppError> {
    let repo = StreakRepository::new(pool);
    let streak = repo.get(&session.username).await?;
    Ok(Json(StreakSummary::new(streak, today())))
}

/// POST /exercise/streak - Mark today's workout done. Marking twice in a day is a no-op.
pub async fn mark_today(
    State(pool): State<Pool>,
    Extension(session): Extension<SessionContext>,
) -> Result<impl IntoResponse, AppError> {
    let date = today();
    let repo = StreakRepository::new(pool);
    let newly_marked = repo.mark(&session.username, date).await?;
    let streak = repo.get(&session.username).await?;
    Ok(Json(MarkResponse {
        newly_marked,
        streak: StreakSummary::new(streak, date),
    }))
}
