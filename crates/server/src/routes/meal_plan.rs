//! AI meal planner

use axum::{
    Extension, Json,
    http::header,
    response::IntoResponse,
};
use nutri_core::models::meal_plan::{MealPlan, PlanPeriod, UserProfile};
use serde::Deserialize;

use crate::ai::{Assistant, meal_plan};
use crate::error::AppError;

#[derive(Deserialize)]
pub struct PlanRequest {
    profile: UserProfile,
    #[serde(default)]
    period: PlanPeriod,
}

#[derive(Deserialize)]
pub struct ExportRequest {
    profile: UserProfile,
    plan: MealPlan,
}

fn validate(profile: &UserProfile) -> Result<(), AppError> {
    if !(1..=120).contains(&profile.age) {
        return Err(AppError::BadRequest("age must be between 1 and 120".to_string()));
    }
    if profile.weight <= 0.0 || profile.height <= 0.0 {
        return Err(AppError::BadRequest(
            "weight and height must be positive".to_string(),
        ));
    }
    Ok(())
}

/// POST /meal-plan - Generate a daily or weekly plan
pub async fn generate(
    Extension(assistant): Extension<Assistant>,
    Json(body): Json<PlanRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate(&body.profile)?;
    Ok(Json(
        meal_plan::generate(&assistant, &body.profile, body.period).await,
    ))
}

/// POST /meal-plan/export - Render a plan as a text download
pub async fn export(Json(body): Json<ExportRequest>) -> Result<impl IntoResponse, AppError> {
    validate(&body.profile)?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"meal_plan.txt\"",
            ),
        ],
        body.plan.text_summary(&body.profile),
    ))
}
