//! Error boundary for the contact routes.
//!
//! A panic while handling a contact request is caught and replaced with a
//! static "Something went wrong" page that offers a reload. The rest of the
//! site is not wrapped.

use std::any::Any;

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::filters;

/// Fallback page rendered when a contact handler panics.
#[derive(Template)]
#[template(path = "errors/boundary.html")]
pub struct BoundaryTemplate;

/// Plain fallback used if the boundary template itself fails to render.
const FALLBACK_HTML: &str = "<!doctype html><title>Something went wrong</title>\
    <h1>Something went wrong</h1><p><a href=\"\">Reload page</a></p>";

/// Layer type returned by [`error_boundary_layer`].
pub type ErrorBoundaryLayer = CatchPanicLayer<fn(Box<dyn Any + Send + 'static>) -> Response>;

/// Create the error boundary layer.
#[must_use]
pub fn error_boundary_layer() -> ErrorBoundaryLayer {
    CatchPanicLayer::custom(render_boundary as fn(Box<dyn Any + Send + 'static>) -> Response)
}

fn render_boundary(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");

    let event_id = sentry::capture_message(detail, sentry::Level::Error);
    tracing::error!(panic = detail, sentry_event_id = %event_id, "Contact handler panicked");

    let body = BoundaryTemplate
        .render()
        .unwrap_or_else(|_| FALLBACK_HTML.to_string());

    (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
}
