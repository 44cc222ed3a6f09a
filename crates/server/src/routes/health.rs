//! Health check endpoint

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use deadpool_postgres::Pool;
use serde::Serialize;

use crate::ai::Assistant;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    /// `live` when a completion credential is configured, `fallback` otherwise
    completion: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

async fn database_reason(pool: &Pool) -> Option<String> {
    let client = match pool.get().await {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Health check pool error");
            return Some(format!("Database connection failed: {}", e));
        }
    };
    match client.query_one("SELECT 1", &[]).await {
        Ok(_) => None,
        Err(e) => {
            tracing::error!(error = %e, "Health check query failed");
            Some(format!("Database query failed: {}", e))
        }
    }
}

/// GET /health - Database connectivity and completion mode
pub async fn check(
    State(pool): State<Pool>,
    Extension(assistant): Extension<Assistant>,
) -> impl IntoResponse {
    let completion = if assistant.client().has_credential() {
        "live"
    } else {
        "fallback"
    };

    match database_reason(&pool).await {
        None => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy",
                completion,
                reason: None,
            }),
        ),
        Some(reason) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unhealthy",
                completion,
                reason: Some(reason),
            }),
        ),
    }
}
