//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//!
//! # Content pages (markdown)
//! GET  /about, /services, /industries, /projects, /clients, /why-us,
//!      /gallery, /privacy-policy, /terms-of-service, /cookie-policy
//!
//! # Contact page (HTMX fragments, wrapped by the error boundary)
//! GET  /contact                - Contact page
//! POST /contact                - Submit (returns form or confirmation fragment)
//! GET  /contact/form           - Fresh idle form (after the confirmation delay)
//!
//! # Contact modal (HTMX fragments)
//! GET  /modal/contact          - Open
//! GET  /modal/contact/close    - Close
//! GET  /modal/contact/toggle   - Toggle from ?state=open|closed
//! POST /modal/contact          - Submit
//!
//! # API
//! POST /api/contact            - JSON submit
//! ```
//!
//! Anything else falls through to the 404 page. A rate-limited submit gets a
//! notice swapped into its form, or a 429 JSON body on the API.

pub mod contact;
pub mod modal;
pub mod pages;

use axum::{
    Router,
    routing::{get, post},
};
use gvs_controls_core::Surface;

use crate::middleware::rate_limit::ContactRateLimiter;
use crate::middleware::{contact_rate_limiter, error_boundary_layer};
use crate::state::AppState;

/// Create the contact page routes router.
pub fn contact_routes(limiter: &ContactRateLimiter) -> Router<AppState> {
    Router::new()
        .route("/", get(contact::show))
        .route("/form", get(contact::form))
        .route(
            "/",
            post(contact::submit)
                .layer(limiter.layer(|_| contact::rate_limited_fragment(Surface::Page))),
        )
        .layer(error_boundary_layer())
}

/// Create the contact modal routes router.
pub fn modal_routes(limiter: &ContactRateLimiter) -> Router<AppState> {
    Router::new()
        .route("/", get(modal::open))
        .route("/close", get(modal::close))
        .route("/toggle", get(modal::toggle))
        .route(
            "/",
            post(modal::submit)
                .layer(limiter.layer(|_| contact::rate_limited_fragment(Surface::Modal))),
        )
}

/// Create all routes for the site.
///
/// The three submit endpoints share one rate limiter, so a client gets one
/// budget across the page, the modal, and the API.
pub fn routes() -> Router<AppState> {
    let limiter = contact_rate_limiter();

    Router::new()
        .merge(pages::router())
        .nest("/contact", contact_routes(&limiter))
        .nest("/modal/contact", modal_routes(&limiter))
        .route(
            "/api/contact",
            post(contact::api_submit).layer(limiter.layer(|_| contact::rate_limited_json())),
        )
        .fallback(pages::not_found)
}
