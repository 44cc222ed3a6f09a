pub mod account;
pub mod assistant;
pub mod auth;
pub mod diet;
pub mod exercise;
pub mod health;
pub mod hospitals;
pub mod meal_plan;
pub mod medicines;
pub mod metrics;
pub mod nutrition;
pub mod pages;
pub mod water;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use chrono::NaiveDate;
use deadpool_postgres::Pool;

/// The server's local calendar date, used for water logs and streaks
pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Routes that need a logged-in session
pub fn protected_routes() -> Router<Pool> {
    Router::new()
        .route("/auth/logout", post(auth::logout))
        .route(
            "/account",
            get(account::get).put(account::update).delete(account::delete),
        )
        .route("/water/logs", post(water::add_log))
        .route("/water/today", get(water::today_summary))
        .route("/water/weekly", get(water::weekly))
        .route("/nutrition/analyze", post(nutrition::analyze))
        .route(
            "/nutrition/image",
            post(nutrition::analyze_image)
                .layer(DefaultBodyLimit::max(nutrition::MAX_IMAGE_BYTES)),
        )
        .route("/assistant/ask", post(assistant::ask))
        .route(
            "/medicines",
            get(medicines::list)
                .post(medicines::add)
                .delete(medicines::clear),
        )
        .route("/medicines/dashboard", get(medicines::dashboard))
        .route("/medicines/export", get(medicines::export))
        .route("/hospitals/search", post(hospitals::search))
        .route("/diet/analyze", post(diet::analyze))
        .route("/meal-plan", post(meal_plan::generate))
        .route("/meal-plan/export", post(meal_plan::export))
        .route("/exercise/videos", post(exercise::videos))
        .route(
            "/exercise/streak",
            get(exercise::streak).post(exercise::mark_today),
        )
}

/// Account creation and login
pub fn auth_routes() -> Router<Pool> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
}
