//! HTTP middleware stack for the site.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, one hub per request)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Security headers (CSP, frame and referrer policy)
//! 5. Error boundary (contact routes only, panics become an error page)
//! 6. Rate limiting (contact submit endpoints only)

pub mod error_boundary;
pub mod rate_limit;
pub mod request_id;
pub mod security_headers;

pub use error_boundary::error_boundary_layer;
pub use rate_limit::contact_rate_limiter;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
