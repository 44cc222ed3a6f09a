//! Audit trail for state-changing requests

use std::time::Instant;

use axum::{body::Body, extract::Request, http::Method, middleware::Next, response::Response};

use super::auth::AuthenticatedUser;
use super::request_id::RequestId;

fn is_mutation(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::DELETE)
}

/// Log every POST, PUT and DELETE once it has completed.
///
/// The acting user is read from the response, where the auth layer leaves it;
/// login, registration and rejected requests are logged as `anonymous`.
pub async fn audit_middleware(request: Request<Body>, next: Next) -> Response {
    if !is_mutation(request.method()) {
        return next.run(request).await;
    }

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|r| r.0.clone())
        .unwrap_or_default();

    let started = Instant::now();
    let response = next.run(request).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    let status = response.status();
    let username = response
        .extensions()
        .get::<AuthenticatedUser>()
        .map_or("anonymous", |u| u.0.as_str());

    if status.is_server_error() {
        tracing::warn!(
            target: "audit",
            request_id = %request_id,
            username,
            method = %method,
            path = %path,
            status = status.as_u16(),
            elapsed_ms,
            "Mutation failed"
        );
    } else {
        tracing::info!(
            target: "audit",
            request_id = %request_id,
            username,
            method = %method,
            path = %path,
            status = status.as_u16(),
            elapsed_ms,
            "Mutation"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_writes_are_audited() {
        assert!(is_mutation(&Method::POST));
        assert!(is_mutation(&Method::DELETE));
        assert!(!is_mutation(&Method::GET));
        assert!(!is_mutation(&Method::OPTIONS));
    }
}
