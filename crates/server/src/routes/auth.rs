//! Registration, login and logout

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use deadpool_postgres::Pool;
use serde::{Deserialize, Serialize};

use crate::db::UserRepository;
use crate::error::AppError;
use crate::session::{SessionContext, SessionStore};

#[derive(Deserialize)]
pub struct RegisterRequest {
    username: String,
    #[serde(default)]
    email: String,
    password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    token: String,
    username: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    username: String,
}

/// POST /auth/register - Create an account
pub async fn register(
    State(pool): State<Pool>,
    Json(body): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let username = body.username.trim();
    if username.is_empty() || body.password.is_empty() {
        return Err(AppError::BadRequest(
            "Username and password are required".to_string(),
        ));
    }

    let repo = UserRepository::new(pool);
    if !repo.register(username, body.email.trim(), &body.password).await? {
        return Err(AppError::Conflict(format!(
            "Username '{}' already exists",
            username
        )));
    }

    tracing::info!(username, "User registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            username: username.to_string(),
        }),
    ))
}

/// POST /auth/login - Exchange credentials for a session token
pub async fn login(
    State(pool): State<Pool>,
    Extension(sessions): Extension<SessionStore>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let username = body.username.trim();
    let repo = UserRepository::new(pool);
    if !repo.authenticate(username, &body.password).await? {
        return Err(AppError::Unauthorized(
            "Invalid username or password".to_string(),
        ));
    }

    let token = sessions.create(username).await;
    tracing::info!(username, "User logged in");
    Ok(Json(LoginResponse {
        token,
        username: username.to_string(),
    }))
}

/// POST /auth/logout - Drop the caller's session
pub async fn logout(
    Extension(sessions): Extension<SessionStore>,
    Extension(session): Extension<SessionContext>,
) -> impl IntoResponse {
    sessions.remove(&session.token).await;
    StatusCode::NO_CONTENT
}
