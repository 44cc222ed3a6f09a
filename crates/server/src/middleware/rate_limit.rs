//! Global request rate limiting

use std::num::NonZeroU32;
use std::sync::Arc;

use axum::{
    Extension,
    body::Body,
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{Quota, RateLimiter, clock::DefaultClock, state::InMemoryState, state::NotKeyed};

use crate::error::AppError;

/// One bucket shared by every client
pub type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Limiter allowing `requests_per_second`. Zero is treated as one.
pub fn create_rate_limiter(requests_per_second: u32) -> SharedRateLimiter {
    let rps = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN);
    Arc::new(RateLimiter::direct(Quota::per_second(rps)))
}

/// Reject with 429 once the bucket is empty
pub async fn rate_limit_middleware(
    Extension(limiter): Extension<SharedRateLimiter>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if limiter.check().is_err() {
        metrics::counter!("rate_limited_requests_total").increment(1);
        tracing::warn!(path = %request.uri().path(), "Rate limit exceeded");
        return AppError::RateLimited.into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_empties_after_quota() {
        let limiter = create_rate_limiter(2);
        assert!(limiter.check().is_ok());
        assert!(limiter.check().is_ok());
        assert!(limiter.check().is_err());
    }

    #[test]
    fn zero_rate_still_admits_one() {
        let limiter = create_rate_limiter(0);
        assert!(limiter.check().is_ok());
    }
}
