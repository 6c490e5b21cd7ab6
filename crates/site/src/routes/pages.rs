//! Content page route handlers.
//!
//! Every informational page is a markdown file under `content/pages`; the
//! route path is the file stem.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use tracing::instrument;

use crate::content::ContentStore;
use crate::filters;
use crate::state::AppState;

/// Slugs served at `/{slug}` by [`router`].
pub const CONTENT_PAGES: [&str; 10] = [
    "about",
    "services",
    "industries",
    "projects",
    "clients",
    "why-us",
    "gallery",
    "privacy-policy",
    "terms-of-service",
    "cookie-policy",
];

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub title: String,
    pub description: String,
    pub tagline: String,
    pub content_html: String,
}

/// Content page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/content.html")]
pub struct ContentPageTemplate {
    pub title: String,
    pub description: String,
    pub tagline: Option<String>,
    pub updated_at: Option<NaiveDate>,
    pub content_html: String,
}

/// 404 page template.
#[derive(Template, WebTemplate)]
#[template(path = "errors/not_found.html")]
pub struct NotFoundTemplate {
    pub path: String,
}

/// 404 response with the not-found page.
fn page_not_found(path: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            path: path.to_string(),
        },
    )
        .into_response()
}

/// Serve a content page by slug.
///
/// A slug without a loaded markdown file gets the 404 page.
fn serve_content_page(content: &ContentStore, slug: &str) -> Response {
    let Some(page) = content.get_page(slug) else {
        tracing::warn!(slug, "Content page is not loaded");
        return page_not_found(&format!("/{slug}"));
    };

    ContentPageTemplate {
        title: page.meta.title.clone(),
        description: page.meta.description.clone().unwrap_or_default(),
        tagline: page.meta.tagline.clone(),
        updated_at: page.meta.updated_at,
        content_html: page.content_html.clone(),
    }
    .into_response()
}

/// Display the home page.
///
/// Falls back to the 404 page if `home.md` is missing.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Response {
    let Some(page) = state.content().get_page("home") else {
        tracing::warn!("Home page is not loaded");
        return page_not_found("/");
    };

    HomeTemplate {
        title: page.meta.title.clone(),
        description: page.meta.description.clone().unwrap_or_default(),
        tagline: page.meta.tagline.clone().unwrap_or_default(),
        content_html: page.content_html.clone(),
    }
    .into_response()
}

/// Catch-all for unknown paths.
#[instrument]
pub async fn not_found(uri: Uri) -> Response {
    page_not_found(uri.path())
}

/// Create the pages routes router.
pub fn router() -> Router<AppState> {
    CONTENT_PAGES
        .into_iter()
        .fold(Router::new().route("/", get(home)), |router, slug| {
            router.route(
                &format!("/{slug}"),
                get(move |State(state): State<AppState>| async move {
                    serve_content_page(state.content(), slug)
                }),
            )
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_missing_markdown_renders_not_found_page() {
        let response = serve_content_page(&ContentStore::default(), "about");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let html = body_text(response).await;
        assert!(html.contains("<code>/about</code>"));
        assert!(html.contains("Return Home"));
    }

    #[tokio::test]
    async fn test_loaded_page_renders() {
        let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("content");
        let content = ContentStore::load(&dir).unwrap();

        let response = serve_content_page(&content, "privacy-policy");
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Last updated"));
    }
}
