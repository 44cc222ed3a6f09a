//! Prometheus HTTP metrics
//!
//! Records `http_requests_total` and `http_request_duration_seconds`, labelled
//! by method, route template and status.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};

/// Label for requests that matched no route, so stray paths cannot grow the label set
const UNMATCHED: &str = "unmatched";

fn route_label(matched: Option<&MatchedPath>) -> String {
    matched.map_or_else(|| UNMATCHED.to_string(), |m| m.as_str().to_string())
}

pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let route = route_label(request.extensions().get::<MatchedPath>());

    let start = Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed().as_secs_f64();

    let status = response.status().as_u16().to_string();

    metrics::counter!(
        "http_requests_total",
        "method" => method.clone(),
        "route" => route.clone(),
        "status" => status
    )
    .increment(1);

    metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "route" => route
    )
    .record(duration);

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmatched_requests_share_one_label() {
        assert_eq!(route_label(None), "unmatched");
    }
}
