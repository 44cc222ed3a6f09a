//! Water intake tracker

use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Days;
use deadpool_postgres::Pool;
use nutri_core::models::water::{
    ActivityLevel, FitnessGoal, MAX_AMOUNT_ML, MIN_AMOUNT_ML, WaterToday, recommend_goal,
    weekly_bars,
};
use serde::Deserialize;

use super::today;
use crate::db::WaterRepository;
use crate::error::AppError;
use crate::session::SessionContext;

const WEIGHT_RANGE_KG: (f64, f64) = (20.0, 200.0);
const HEIGHT_RANGE_CM: (f64, f64) = (120.0, 220.0);
const WEEK_DAYS: u64 = 7;

#[derive(Deserialize)]
pub struct LogRequest {
    amount: i32,
}

/// Profile used for the daily goal; every field has the form's default
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ProfileQuery {
    weight: f64,
    height: f64,
    activity: ActivityLevel,
    goal: FitnessGoal,
}

impl Default for ProfileQuery {
    fn default() -> Self {
        Self {
            weight: 70.0,
            height: 170.0,
            activity: ActivityLevel::default(),
            goal: FitnessGoal::default(),
        }
    }
}

impl ProfileQuery {
    fn validate(&self) -> Result<(), AppError> {
        if !(WEIGHT_RANGE_KG.0..=WEIGHT_RANGE_KG.1).contains(&self.weight) {
            return Err(AppError::BadRequest(format!(
                "weight must be between {} and {} kg",
                WEIGHT_RANGE_KG.0, WEIGHT_RANGE_KG.1
            )));
        }
        if !(HEIGHT_RANGE_CM.0..=HEIGHT_RANGE_CM.1).contains(&self.height) {
            return Err(AppError::BadRequest(format!(
                "height must be between {} and {} cm",
                HEIGHT_RANGE_CM.0, HEIGHT_RANGE_CM.1
            )));
        }
        Ok(())
    }
}

/// POST /water/logs - Log one drink for today
pub async fn add_log(
    State(pool): State<Pool>,
    Extension(session): Extension<SessionContext>,
    Json(body): Json<LogRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !(MIN_AMOUNT_ML..=MAX_AMOUNT_ML).contains(&body.amount) {
        return Err(AppError::BadRequest(format!(
            "amount must be between {} and {} ml",
            MIN_AMOUNT_ML, MAX_AMOUNT_ML
        )));
    }

    let repo = WaterRepository::new(pool);
    let log = repo.record(&session.username, body.amount, today()).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

/// GET /water/today - Today's logs, total, goal, donut and advice
pub async fn today_summary(
    State(pool): State<Pool>,
    Extension(session): Extension<SessionContext>,
    Query(profile): Query<ProfileQuery>,
) -> Result<impl IntoResponse, AppError> {
    profile.validate()?;
    let goal = recommend_goal(profile.weight, profile.height, profile.activity, profile.goal);

    let date = today();
    let repo = WaterRepository::new(pool);
    let logs = repo.logs_for(&session.username, date).await?;
    Ok(Json(WaterToday::summarize(date.to_string(), logs, goal)))
}

/// GET /water/weekly - Per-day totals for the past week
pub async fn weekly(
    State(pool): State<Pool>,
    Extension(session): Extension<SessionContext>,
) -> Result<impl IntoResponse, AppError> {
    let date = today();
    let since = date.checked_sub_days(Days::new(WEEK_DAYS)).unwrap_or(date);
    let repo = WaterRepository::new(pool);
    let totals = repo.daily_totals(&session.username, since).await?;
    Ok(Json(weekly_bars(totals)))
}
