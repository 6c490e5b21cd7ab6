//! Rate limiting middleware using governor and `tower_governor`.
//!
//! Contact submissions each trigger two outbound emails, so the submit
//! endpoints share one strict per-IP limiter. Each endpoint gets its own
//! layer over that limiter so a rejected request is answered in the shape
//! its client expects.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{HeaderMap, Request, Response};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use tower_governor::governor::{GovernorConfig, GovernorConfigBuilder};
use tower_governor::{GovernorError, GovernorLayer};

/// Proxy headers consulted for the client IP, in priority order.
///
/// `x-forwarded-for` may hold a chain; only its first entry is used.
const CLIENT_IP_HEADERS: [&str; 4] = [
    "cf-connecting-ip",
    "x-forwarded-for",
    "x-real-ip",
    "fly-client-ip",
];

/// Key extractor that reads the client IP from Cloudflare and proxy headers,
/// falling back to the peer address of the connection.
#[derive(Clone, Copy)]
pub struct CloudflareIpKeyExtractor;

impl tower_governor::key_extractor::KeyExtractor for CloudflareIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        client_ip(req.headers())
            .or_else(|| peer_ip(req))
            .ok_or(GovernorError::UnableToExtractKey)
    }
}

/// First parseable client IP from the proxy headers.
fn client_ip(headers: &HeaderMap) -> Option<IpAddr> {
    CLIENT_IP_HEADERS.iter().find_map(|name| {
        headers
            .get(*name)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.split(',').next())
            .and_then(|s| s.trim().parse::<IpAddr>().ok())
    })
}

/// Peer address recorded by `into_make_service_with_connect_info`.
fn peer_ip<T>(req: &Request<T>) -> Option<IpAddr> {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
}

type LimiterConfig = GovernorConfig<CloudflareIpKeyExtractor, NoOpMiddleware<QuantaInstant>>;

/// Rate limiter layer type for Axum.
pub type RateLimiterLayer =
    GovernorLayer<CloudflareIpKeyExtractor, NoOpMiddleware<QuantaInstant>, Body>;

/// One limiter shared by every submit endpoint.
#[derive(Clone)]
pub struct ContactRateLimiter {
    config: Arc<LimiterConfig>,
}

impl ContactRateLimiter {
    /// A layer over the shared limiter that answers rejections with `on_limit`.
    ///
    /// Errors other than [`GovernorError::TooManyRequests`] keep the default
    /// `tower_governor` response.
    pub fn layer<F>(&self, on_limit: F) -> RateLimiterLayer
    where
        F: Fn(u64) -> Response<Body> + Send + Sync + 'static,
    {
        GovernorLayer::new(Arc::clone(&self.config)).error_handler(move |error| match error {
            GovernorError::TooManyRequests { wait_time, headers } => {
                tracing::warn!(wait_time, "Contact submission rate limited");
                let mut response = on_limit(wait_time);
                if let Some(headers) = headers {
                    response.headers_mut().extend(headers);
                }
                response
            }
            other => other.into(),
        })
    }
}

/// Create rate limiter for contact submissions: ~10 requests per minute per IP.
///
/// Configuration: 1 request every 6 seconds (replenish), burst of 5.
///
/// # Panics
///
/// This function will not panic. `per_second(6)` and `burst_size(5)` are
/// always accepted by `GovernorConfigBuilder`.
#[must_use]
pub fn contact_rate_limiter() -> ContactRateLimiter {
    let config = GovernorConfigBuilder::default()
        .key_extractor(CloudflareIpKeyExtractor)
        .per_second(6)
        .burst_size(5)
        .finish()
        .expect("rate limiter config with per_second(6) and burst_size(5) is valid");
    ContactRateLimiter {
        config: Arc::new(config),
    }
}
