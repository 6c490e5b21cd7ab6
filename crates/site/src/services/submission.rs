//! Submission controller shared by the contact page and the contact modal.
//!
//! Runs one submit through validation, the provider configuration check, and
//! the dual-send dispatch, and drives the surface's [`SubmissionView`]
//! through the matching transitions. Both surfaces call [`SubmissionController::run`],
//! so they cannot drift apart.

use std::time::Instant;

use gvs_controls_core::{
    DispatchFailure, EmailRule, InquiryForm, InvalidTransition, SubmissionAttempt,
    SubmissionOutcome, SubmissionView,
};
use tracing::instrument;

use crate::config::{ProviderIds, SiteConfig};
use crate::services::dispatcher::{DispatchError, InquiryDispatcher};
use crate::services::emailjs::{EmailJsClient, EmailJsError};

/// Validates and dispatches contact submissions.
#[derive(Clone)]
pub struct SubmissionController {
    dispatcher: InquiryDispatcher,
    ids: Result<ProviderIds, Vec<&'static str>>,
    email_rule: EmailRule,
}

impl SubmissionController {
    /// Build the controller from site configuration.
    ///
    /// Missing provider identifiers are not an error here; they are reported
    /// on every submit instead.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn from_config(config: &SiteConfig) -> Result<Self, EmailJsError> {
        let client = EmailJsClient::new(&config.emailjs)?;
        let dispatcher = InquiryDispatcher::new(
            client,
            config.contact.owner_email.clone(),
            config.contact.send_timeout,
        );

        Ok(Self {
            dispatcher,
            ids: config.emailjs.provider_ids(),
            email_rule: config.contact.email_rule,
        })
    }

    /// Email check applied to every submission.
    #[must_use]
    pub const fn email_rule(&self) -> EmailRule {
        self.email_rule
    }

    /// Names of missing provider identifiers, empty when fully configured.
    #[must_use]
    pub fn missing_ids(&self) -> &[&'static str] {
        match &self.ids {
            Ok(_) => &[],
            Err(missing) => missing,
        }
    }

    /// Validate and dispatch one form without touching any view state.
    #[instrument(skip_all)]
    pub async fn submit(&self, form: &InquiryForm) -> SubmissionOutcome {
        let validation = form.validate(self.email_rule);
        if !validation.is_valid() {
            tracing::debug!(
                missing = ?validation.missing,
                invalid = ?validation.invalid,
                "Inquiry rejected by validation"
            );
            return SubmissionOutcome::ValidationError(validation);
        }

        let ids = match &self.ids {
            Ok(ids) => ids,
            Err(missing) => {
                tracing::error!(?missing, "EmailJS configuration is incomplete");
                return SubmissionOutcome::ConfigError {
                    missing: missing.clone(),
                };
            }
        };

        let attempt = SubmissionAttempt::from_form(form);
        match self.dispatcher.dispatch(ids, &attempt).await {
            Ok(()) => {
                tracing::info!(
                    from_email = %attempt.from_email(),
                    owner = %self.dispatcher.owner(),
                    "Inquiry sent"
                );
                SubmissionOutcome::Success
            }
            Err(e) => {
                let (failure, status) = match &e {
                    DispatchError::Send { source, .. } => (DispatchFailure::Rejected, source.status()),
                    DispatchError::TimedOut(_) => (DispatchFailure::TimedOut, None),
                };
                tracing::error!(
                    error = %e,
                    status = ?status,
                    service_id = %ids.service_id,
                    customer_template_id = %ids.customer_template_id,
                    owner_template_id = %ids.owner_template_id,
                    "EmailJS dispatch failed"
                );
                SubmissionOutcome::DispatchError(failure)
            }
        }
    }

    /// Run one submit on a surface.
    ///
    /// Invalid forms leave the view in `Idle` and nothing is sent. Otherwise
    /// the view passes through `Submitting` and ends in `Submitted` (form
    /// cleared) or back in `Idle` (form kept).
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTransition`] if the view is not `Idle`.
    pub async fn run(
        &self,
        view: &mut SubmissionView,
    ) -> Result<SubmissionOutcome, InvalidTransition> {
        let validation = view.form().validate(self.email_rule);
        if !validation.is_valid() {
            return Ok(SubmissionOutcome::ValidationError(validation));
        }

        view.begin_submit()?;
        let outcome = self.submit(view.form()).await;
        view.finish(&outcome, Instant::now())?;
        Ok(outcome)
    }
}
