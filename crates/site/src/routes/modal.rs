//! Contact modal route handlers.
//!
//! The open/closed flag lives in the page as a hidden `state` input inside
//! `#modal-root`. Every modal response re-renders that root, so the next
//! toggle request carries the current value back. Each handler applies one
//! [`ContactModal`] operation and renders the result.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use gvs_controls_core::{ContactModal, InquiryForm, SubmissionView, Surface};
use serde::Deserialize;
use tracing::instrument;

use super::contact::{FormView, SubmittedView, render_outcome};
use crate::error::{AppError, add_breadcrumb};
use crate::state::AppState;

/// `#modal-root` contents: the hidden state input and, when open, the dialog.
#[derive(Template, WebTemplate)]
#[template(path = "modal/contact.html")]
pub struct ModalTemplate {
    pub modal: ContactModal,
    pub form: FormView,
}

impl ModalTemplate {
    #[must_use]
    pub fn open(form: FormView) -> Self {
        let mut modal = ContactModal::closed();
        modal.open();
        Self { modal, form }
    }

    #[must_use]
    pub fn from_state(modal: ContactModal) -> Self {
        Self {
            modal,
            form: FormView::empty(Surface::Modal),
        }
    }
}

/// Confirmation inside the still-open dialog; closes it after the delay.
#[derive(Template, WebTemplate)]
#[template(path = "modal/submitted.html")]
pub struct ModalSubmittedTemplate {
    pub submitted: SubmittedView,
}

/// Query for the toggle endpoint.
#[derive(Debug, Deserialize)]
pub struct ToggleQuery {
    #[serde(default)]
    pub state: String,
}

/// Open the modal with an empty form.
///
/// GET /modal/contact
pub async fn open() -> impl IntoResponse {
    ModalTemplate::open(FormView::empty(Surface::Modal))
}

/// Close the modal.
///
/// GET /modal/contact/close
///
/// Also requested by the modal confirmation once its delay expires. The
/// reported state is ignored; closing is valid from either state.
pub async fn close() -> impl IntoResponse {
    ModalTemplate::from_state(ContactModal::closed())
}

/// Flip the modal from the state the page reports.
///
/// GET /modal/contact/toggle?state=open|closed
///
/// # Errors
///
/// Returns a bad request for an unknown `state` value.
#[instrument]
pub async fn toggle(Query(query): Query<ToggleQuery>) -> Result<impl IntoResponse, AppError> {
    let mut modal: ContactModal = query.state.parse().map_err(AppError::BadRequest)?;
    modal.toggle();
    Ok(ModalTemplate::from_state(modal))
}

/// Submit the modal form.
///
/// POST /modal/contact
///
/// # Errors
///
/// Returns an internal error if the view rejects the transition.
#[instrument(skip(state, form))]
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<InquiryForm>,
) -> Result<Response, AppError> {
    let mut view = SubmissionView::with_form(Surface::Modal, form);
    let outcome = state
        .submissions()
        .run(&mut view)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    add_breadcrumb(
        "contact",
        "Modal inquiry submitted",
        Some(&[("success", if outcome.is_success() { "true" } else { "false" })]),
    );

    Ok(render_outcome(&view, &outcome))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_open_renders_dialog_and_state() {
        let html = ModalTemplate::open(FormView::empty(Surface::Modal))
            .render()
            .unwrap();

        assert!(html.contains("role=\"dialog\""));
        assert!(html.contains("name=\"state\" value=\"open\""));
        assert!(html.contains("id=\"modal-name\""));
    }

    #[test]
    fn test_open_dialog_triggers_need_no_eval() {
        let html = ModalTemplate::open(FormView::empty(Surface::Modal))
            .render()
            .unwrap();

        // Bracketed event filters are compiled with `Function`, which the CSP blocks
        let triggers: Vec<&str> = html
            .split("hx-trigger=\"")
            .skip(1)
            .filter_map(|rest| rest.split('"').next())
            .collect();
        assert!(!triggers.is_empty());
        assert!(triggers.iter().all(|t| !t.contains('[')), "{triggers:?}");
        assert!(!html.contains("keyup"));
    }

    #[test]
    fn test_closed_renders_state_only() {
        let html = ModalTemplate::from_state(ContactModal::closed())
            .render()
            .unwrap();

        assert!(!html.contains("role=\"dialog\""));
        assert!(html.contains("name=\"state\" value=\"closed\""));
    }
}
