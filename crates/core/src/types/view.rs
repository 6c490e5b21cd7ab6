//! View state for a contact surface.
//!
//! Both the modal and the contact page own one [`SubmissionView`]. The
//! transitions are the same for both; only the delay after a successful
//! submit and what happens when it expires differ.
//!
//! ```text
//! Idle --begin--> Submitting --success--> Submitted --delay--> Idle
//!                     |
//!                     +--------failure--------------------> Idle
//! ```

use std::time::{Duration, Instant};

use super::inquiry::{Field, InquiryForm};
use super::outcome::SubmissionOutcome;

/// Which contact surface a view belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// The dialog opened from the header, hero, or mobile menu.
    Modal,
    /// The standalone `/contact` page.
    Page,
}

/// What the surface does once the submitted state expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterSubmit {
    /// Show the empty form again.
    ShowForm,
    /// Close the hosting modal.
    CloseModal,
}

impl Surface {
    /// How long the confirmation stays visible.
    #[must_use]
    pub const fn reset_delay(self) -> Duration {
        match self {
            Self::Modal => Duration::from_secs(2),
            Self::Page => Duration::from_secs(5),
        }
    }

    #[must_use]
    pub const fn after_submit(self) -> AfterSubmit {
        match self {
            Self::Modal => AfterSubmit::CloseModal,
            Self::Page => AfterSubmit::ShowForm,
        }
    }

    #[must_use]
    pub const fn success_message(self) -> &'static str {
        match self {
            Self::Modal => "Your message has been sent. We'll get back to you soon.",
            Self::Page => {
                "Your message has been sent. You'll receive a confirmation email shortly."
            }
        }
    }

    /// Prefix for element ids so both surfaces can share one page.
    #[must_use]
    pub const fn id_prefix(self) -> &'static str {
        match self {
            Self::Modal => "modal-",
            Self::Page => "",
        }
    }
}

/// Observable state of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Submitting,
    Submitted { since: Instant },
}

/// Error for a transition that is not allowed from the current state.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cannot {action} while {state:?}")]
pub struct InvalidTransition {
    pub action: &'static str,
    pub state: ViewState,
}

/// Form contents plus view state for one surface.
#[derive(Debug, Clone)]
pub struct SubmissionView {
    surface: Surface,
    state: ViewState,
    form: InquiryForm,
}

impl SubmissionView {
    /// A fresh surface with an empty form.
    #[must_use]
    pub fn new(surface: Surface) -> Self {
        Self::with_form(surface, InquiryForm::default())
    }

    /// A surface in `Idle` holding previously typed values.
    #[must_use]
    pub const fn with_form(surface: Surface, form: InquiryForm) -> Self {
        Self {
            surface,
            state: ViewState::Idle,
            form,
        }
    }

    #[must_use]
    pub const fn surface(&self) -> Surface {
        self.surface
    }

    #[must_use]
    pub const fn state(&self) -> ViewState {
        self.state
    }

    #[must_use]
    pub const fn form(&self) -> &InquiryForm {
        &self.form
    }

    /// Whether inputs and the submit control accept interaction.
    #[must_use]
    pub const fn inputs_enabled(&self) -> bool {
        matches!(self.state, ViewState::Idle)
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self.state, ViewState::Submitting)
    }

    #[must_use]
    pub const fn is_submitted(&self) -> bool {
        matches!(self.state, ViewState::Submitted { .. })
    }

    /// Apply a keystroke. Ignored unless the form is editable.
    pub fn update_field(&mut self, field: Field, value: impl Into<String>) -> bool {
        if !self.inputs_enabled() {
            return false;
        }
        self.form.update_field(field, value);
        true
    }

    /// Enter `Submitting` after validation has passed.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTransition`] unless the view is `Idle`, which is what
    /// keeps a second click from starting a second dispatch.
    pub fn begin_submit(&mut self) -> Result<(), InvalidTransition> {
        if self.state != ViewState::Idle {
            return Err(InvalidTransition {
                action: "submit",
                state: self.state,
            });
        }
        self.state = ViewState::Submitting;
        Ok(())
    }

    /// Record the dispatch result.
    ///
    /// Success clears the form and shows the confirmation; any other outcome
    /// returns to `Idle` with the typed values kept for a retry.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTransition`] unless the view is `Submitting`.
    pub fn finish(
        &mut self,
        outcome: &SubmissionOutcome,
        now: Instant,
    ) -> Result<(), InvalidTransition> {
        if self.state != ViewState::Submitting {
            return Err(InvalidTransition {
                action: "finish",
                state: self.state,
            });
        }
        if outcome.is_success() {
            self.form.clear();
            self.state = ViewState::Submitted { since: now };
        } else {
            self.state = ViewState::Idle;
        }
        Ok(())
    }

    /// Expire the confirmation once the surface's delay has passed.
    ///
    /// Returns the follow-up action exactly once, on the call that performs
    /// the transition back to `Idle`.
    pub fn poll(&mut self, now: Instant) -> Option<AfterSubmit> {
        let ViewState::Submitted { since } = self.state else {
            return None;
        };
        if now.saturating_duration_since(since) < self.surface.reset_delay() {
            return None;
        }
        self.state = ViewState::Idle;
        Some(self.surface.after_submit())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::outcome::DispatchFailure;

    fn filled(surface: Surface) -> SubmissionView {
        let mut view = SubmissionView::new(surface);
        view.update_field(Field::Name, "Jane Doe");
        view.update_field(Field::Email, "jane@example.com");
        view.update_field(Field::Message, "Need a quote");
        view
    }

    #[test]
    fn test_success_clears_and_page_resets_after_five_seconds() {
        let mut view = filled(Surface::Page);
        let start = Instant::now();

        view.begin_submit().unwrap();
        assert!(view.is_submitting());
        assert!(!view.inputs_enabled());

        view.finish(&SubmissionOutcome::Success, start).unwrap();
        assert!(view.is_submitted());
        assert_eq!(view.form(), &InquiryForm::default());

        assert_eq!(view.poll(start + Duration::from_secs(4)), None);
        assert!(view.is_submitted());

        assert_eq!(
            view.poll(start + Duration::from_secs(5)),
            Some(AfterSubmit::ShowForm)
        );
        assert_eq!(view.state(), ViewState::Idle);
        assert_eq!(view.poll(start + Duration::from_secs(6)), None);
    }

    #[test]
    fn test_modal_closes_after_two_seconds() {
        let mut view = filled(Surface::Modal);
        let start = Instant::now();
        view.begin_submit().unwrap();
        view.finish(&SubmissionOutcome::Success, start).unwrap();

        assert_eq!(view.poll(start + Duration::from_millis(1999)), None);
        assert_eq!(
            view.poll(start + Duration::from_secs(2)),
            Some(AfterSubmit::CloseModal)
        );
    }

    #[test]
    fn test_failure_returns_to_idle_and_keeps_values() {
        let mut view = filled(Surface::Page);
        let before = view.form().clone();

        view.begin_submit().unwrap();
        view.finish(
            &SubmissionOutcome::DispatchError(DispatchFailure::Rejected),
            Instant::now(),
        )
        .unwrap();

        assert_eq!(view.state(), ViewState::Idle);
        assert!(view.inputs_enabled());
        assert_eq!(view.form(), &before);
    }

    #[test]
    fn test_second_submit_while_submitting_is_rejected() {
        let mut view = filled(Surface::Modal);
        view.begin_submit().unwrap();
        let err = view.begin_submit().unwrap_err();
        assert_eq!(err.state, ViewState::Submitting);
    }

    #[test]
    fn test_inputs_locked_while_submitting() {
        let mut view = filled(Surface::Page);
        view.begin_submit().unwrap();
        assert!(!view.update_field(Field::Name, "Someone else"));
        assert_eq!(view.form().name, "Jane Doe");
    }

    #[test]
    fn test_finish_requires_submitting() {
        let mut view = filled(Surface::Page);
        assert!(
            view.finish(&SubmissionOutcome::Success, Instant::now())
                .is_err()
        );
        assert_eq!(view.form().name, "Jane Doe");
    }
}
