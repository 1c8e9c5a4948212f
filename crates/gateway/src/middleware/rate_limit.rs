//! Rate limiting middleware using a token bucket

use axum::{extract::Request, middleware::Next, response::Response};
use governor::{
    clock::QuantaClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use newsdesk_common::config::RateLimitConfig;
use newsdesk_common::errors::AppError;
use std::num::NonZeroU32;
use std::sync::Arc;

/// Process-wide rate limiter
pub type GlobalRateLimiter = RateLimiter<NotKeyed, InMemoryState, QuantaClock>;

/// Build a rate limiter from configuration; None when disabled
pub fn create_rate_limiter(config: &RateLimitConfig) -> Option<Arc<GlobalRateLimiter>> {
    if !config.enabled {
        return None;
    }

    let rps = NonZeroU32::new(config.requests_per_second.max(1))?;
    let burst = NonZeroU32::new(config.burst.max(1))?;
    let quota = Quota::per_second(rps).allow_burst(burst);

    Some(Arc::new(RateLimiter::direct(quota)))
}

/// Rate limiting middleware
pub async fn rate_limit_middleware(
    request: Request,
    next: Next,
    limiter: Arc<GlobalRateLimiter>,
    limit: u32,
) -> Result<Response, AppError> {
    match limiter.check() {
        Ok(_) => Ok(next.run(request).await),
        Err(_) => {
            tracing::warn!("Rate limit exceeded");
            Err(AppError::RateLimited { limit })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(enabled: bool) -> RateLimitConfig {
        RateLimitConfig {
            requests_per_second: 100,
            burst: 200,
            enabled,
        }
    }

    #[test]
    fn test_rate_limiter_creation() {
        let limiter = create_rate_limiter(&config(true)).unwrap();
        assert!(limiter.check().is_ok());
    }

    #[test]
    fn test_disabled_config_yields_none() {
        assert!(create_rate_limiter(&config(false)).is_none());
    }

    #[test]
    fn test_burst_exhaustion() {
        let limiter = create_rate_limiter(&RateLimitConfig {
            requests_per_second: 1,
            burst: 2,
            enabled: true,
        })
        .unwrap();

        assert!(limiter.check().is_ok());
        assert!(limiter.check().is_ok());
        assert!(limiter.check().is_err());
    }
}
