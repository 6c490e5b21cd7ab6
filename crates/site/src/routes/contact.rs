//! Contact page route handlers.
//!
//! The page surface is an HTMX form: submits swap `#contact-panel` with either
//! the idle form (plus a notice) or the confirmation, which fetches a fresh
//! form after [`Surface::reset_delay`]. `POST /api/contact` runs the same
//! pipeline for JSON clients.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json,
    extract::State,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use gvs_controls_core::{
    AfterSubmit, DispatchFailure, InquiryForm, Notice, Subject, SubmissionOutcome, SubmissionView,
    Surface,
};
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, add_breadcrumb};
use crate::filters;
use crate::state::AppState;

/// One `<option>` of the subject select.
#[derive(Debug, Clone)]
pub struct SubjectOption {
    pub value: &'static str,
    pub selected: bool,
}

/// Everything a template needs to render the inquiry form on one surface.
#[derive(Debug, Clone)]
pub struct FormView {
    /// Where the form posts.
    pub action: &'static str,
    /// Element the response replaces.
    pub target: &'static str,
    /// Prefix for element ids.
    pub prefix: &'static str,
    pub values: InquiryForm,
    pub subjects: Vec<SubjectOption>,
    pub notice: Option<Notice>,
}

impl FormView {
    /// Build the form for `surface` from the view's current values.
    #[must_use]
    pub fn new(view: &SubmissionView, notice: Option<Notice>) -> Self {
        let surface = view.surface();
        let values = view.form().clone();
        let selected = values.known_subject();
        let subjects = Subject::ALL
            .into_iter()
            .map(|subject| SubjectOption {
                value: subject.as_str(),
                selected: selected == Some(subject),
            })
            .collect();

        Self {
            action: submit_path(surface),
            target: panel_target(surface),
            prefix: surface.id_prefix(),
            values,
            subjects,
            notice,
        }
    }

    /// An empty idle form.
    #[must_use]
    pub fn empty(surface: Surface) -> Self {
        Self::new(&SubmissionView::new(surface), None)
    }
}

/// Confirmation shown after a successful submit.
///
/// The fragment requests `follow_up` once `delay_ms` has elapsed.
#[derive(Debug, Clone)]
pub struct SubmittedView {
    pub message: &'static str,
    pub follow_up: &'static str,
    pub target: &'static str,
    pub delay_ms: u128,
}

impl SubmittedView {
    #[must_use]
    pub fn new(surface: Surface) -> Self {
        let (follow_up, target) = match surface.after_submit() {
            AfterSubmit::ShowForm => ("/contact/form", "#contact-panel"),
            AfterSubmit::CloseModal => ("/modal/contact/close", "#modal-root"),
        };

        Self {
            message: surface.success_message(),
            follow_up,
            target,
            delay_ms: surface.reset_delay().as_millis(),
        }
    }
}

const fn submit_path(surface: Surface) -> &'static str {
    match surface {
        Surface::Page => "/contact",
        Surface::Modal => "/modal/contact",
    }
}

const fn panel_target(surface: Surface) -> &'static str {
    match surface {
        Surface::Page => "#contact-panel",
        Surface::Modal => "#modal-root",
    }
}

const fn notice_target(surface: Surface) -> &'static str {
    match surface {
        Surface::Page => "#contact-notice",
        Surface::Modal => "#modal-contact-notice",
    }
}

/// Full contact page.
#[derive(Template, WebTemplate)]
#[template(path = "contact/page.html")]
pub struct ContactPageTemplate {
    pub title: String,
    pub description: String,
    pub details_html: String,
    pub form: FormView,
}

/// Idle form fragment.
#[derive(Template, WebTemplate)]
#[template(path = "contact/form.html")]
pub struct ContactFormTemplate {
    pub form: FormView,
}

/// Confirmation fragment.
#[derive(Template, WebTemplate)]
#[template(path = "contact/submitted.html")]
pub struct ContactSubmittedTemplate {
    pub submitted: SubmittedView,
}

/// A lone toast, swapped into a form's notice slot.
#[derive(Template, WebTemplate)]
#[template(path = "partials/notice.html")]
pub struct NoticeTemplate {
    pub notice: Notice,
}

/// Answer a rate-limited HTMX submit on `surface`.
///
/// The toast is retargeted into the submitting form's notice slot, so the
/// typed values stay in place.
#[must_use]
pub fn rate_limited_fragment(surface: Surface) -> Response {
    let mut response = NoticeTemplate {
        notice: Notice::rate_limited(),
    }
    .into_response();
    let headers = response.headers_mut();
    headers.insert(
        "hx-retarget",
        HeaderValue::from_static(notice_target(surface)),
    );
    headers.insert("hx-reswap", HeaderValue::from_static("innerHTML"));
    response
}

/// Answer a rate-limited JSON submit.
#[must_use]
pub fn rate_limited_json() -> Response {
    (
        StatusCode::TOO_MANY_REQUESTS,
        Json(ContactResponse {
            success: false,
            message: Some(Notice::rate_limited().description.to_string()),
        }),
    )
        .into_response()
}

/// Display the contact page.
///
/// The office details beside the form come from `content/pages/contact.md`.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    let (title, description, details_html) = state.content().get_page("contact").map_or_else(
        || ("Contact Us".to_string(), String::new(), String::new()),
        |page| {
            (
                page.meta.title.clone(),
                page.meta.description.clone().unwrap_or_default(),
                page.content_html.clone(),
            )
        },
    );

    ContactPageTemplate {
        title,
        description,
        details_html,
        form: FormView::empty(Surface::Page),
    }
}

/// Fresh idle form, requested by the confirmation once its delay expires.
///
/// GET /contact/form
pub async fn form() -> impl IntoResponse {
    ContactFormTemplate {
        form: FormView::empty(Surface::Page),
    }
}

/// Submit the page form.
///
/// POST /contact
///
/// Always answers 200 so HTMX swaps the fragment; the notice carries the
/// outcome.
///
/// # Errors
///
/// Returns an internal error if the view rejects the transition.
#[instrument(skip(state, form))]
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<InquiryForm>,
) -> Result<Response, AppError> {
    let mut view = SubmissionView::with_form(Surface::Page, form);
    let outcome = state
        .submissions()
        .run(&mut view)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    add_breadcrumb(
        "contact",
        "Page inquiry submitted",
        Some(&[("success", if outcome.is_success() { "true" } else { "false" })]),
    );

    Ok(render_outcome(&view, &outcome))
}

/// Render the fragment for a finished submit on either surface.
pub(crate) fn render_outcome(view: &SubmissionView, outcome: &SubmissionOutcome) -> Response {
    let surface = view.surface();

    if view.is_submitted() {
        let submitted = SubmittedView::new(surface);
        return match surface {
            Surface::Page => ContactSubmittedTemplate { submitted }.into_response(),
            Surface::Modal => super::modal::ModalSubmittedTemplate { submitted }.into_response(),
        };
    }

    let form = FormView::new(view, Some(outcome.notice(surface)));
    match surface {
        Surface::Page => ContactFormTemplate { form }.into_response(),
        Surface::Modal => super::modal::ModalTemplate::open(form).into_response(),
    }
}

/// Response for JSON submissions.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// HTTP status for an outcome of the JSON endpoint.
const fn api_status(outcome: &SubmissionOutcome) -> StatusCode {
    match outcome {
        SubmissionOutcome::Success => StatusCode::OK,
        SubmissionOutcome::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SubmissionOutcome::ConfigError { .. } => StatusCode::SERVICE_UNAVAILABLE,
        SubmissionOutcome::DispatchError(DispatchFailure::Rejected) => StatusCode::BAD_GATEWAY,
        SubmissionOutcome::DispatchError(DispatchFailure::TimedOut) => {
            StatusCode::GATEWAY_TIMEOUT
        }
    }
}

/// Submit an inquiry as JSON.
///
/// POST /api/contact
#[instrument(skip(state, form))]
pub async fn api_submit(
    State(state): State<AppState>,
    Json(form): Json<InquiryForm>,
) -> impl IntoResponse {
    let outcome = state.submissions().submit(&form).await;
    let notice = outcome.notice(Surface::Page);

    (
        api_status(&outcome),
        Json(ContactResponse {
            success: outcome.is_success(),
            message: Some(notice.description.to_string()),
        }),
    )
}
