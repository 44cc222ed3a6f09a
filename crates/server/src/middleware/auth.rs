//! Session authentication middleware

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::session::SessionStore;

/// Username of the session that served a request, left on the response for outer layers
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub String);

/// Pull the token out of an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Resolve the bearer token to a session and attach its [`SessionContext`](crate::session::SessionContext)
pub async fn auth_middleware(mut request: Request<Body>, next: Next) -> Response {
    let Some(store) = request.extensions().get::<SessionStore>().cloned() else {
        return AppError::Internal("Session store not configured".to_string()).into_response();
    };

    let Some(token) = bearer_token(request.headers()).map(str::to_string) else {
        return AppError::Unauthorized("Missing bearer token. Please log in.".to_string())
            .into_response();
    };

    match store.get(&token).await {
        Some(session) => {
            let user = AuthenticatedUser(session.username.clone());
            request.extensions_mut().insert(session);
            let mut response = next.run(request).await;
            response.extensions_mut().insert(user);
            response
        }
        None => AppError::Unauthorized("Session expired or invalid. Please log in again.".to_string())
            .into_response(),
    }
}
