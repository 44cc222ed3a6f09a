//! Account details, email edits and deletion

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use deadpool_postgres::Pool;
use serde::Deserialize;

use crate::db::UserRepository;
use crate::error::AppError;
use crate::session::{SessionContext, SessionStore};

#[derive(Deserialize)]
pub struct UpdateAccountRequest {
    email: String,
}

fn missing(username: &str) -> AppError {
    AppError::NotFound(format!("User '{}' not found", username))
}

/// GET /account
pub async fn get(
    State(pool): State<Pool>,
    Extension(session): Extension<SessionContext>,
) -> Result<impl IntoResponse, AppError> {
    let repo = UserRepository::new(pool);
    match repo.get_user_info(&session.username).await? {
        Some(info) => Ok(Json(info)),
        None => Err(missing(&session.username)),
    }
}

/// PUT /account - Change the email address
pub async fn update(
    State(pool): State<Pool>,
    Extension(session): Extension<SessionContext>,
    Json(body): Json<UpdateAccountRequest>,
) -> Result<impl IntoResponse, AppError> {
    let repo = UserRepository::new(pool);
    if !repo.update_email(&session.username, body.email.trim()).await? {
        return Err(missing(&session.username));
    }
    match repo.get_user_info(&session.username).await? {
        Some(info) => Ok(Json(info)),
        None => Err(missing(&session.username)),
    }
}

/// DELETE /account - Remove the account and end all of its sessions
pub async fn delete(
    State(pool): State<Pool>,
    Extension(sessions): Extension<SessionStore>,
    Extension(session): Extension<SessionContext>,
) -> Result<impl IntoResponse, AppError> {
    let repo = UserRepository::new(pool);
    if !repo.delete(&session.username).await? {
        return Err(missing(&session.username));
    }

    let ended = sessions.remove_user(&session.username).await;
    tracing::info!(username = %session.username, sessions_ended = ended, "Account deleted");
    Ok(StatusCode::NO_CONTENT)
}
