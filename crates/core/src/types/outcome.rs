//! Submission outcomes and the notices shown for them.

use serde::Serialize;

use super::inquiry::{Field, Validation};
use super::view::Surface;

/// Why a dispatch did not succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchFailure {
    /// At least one of the two sends was rejected or failed in transport.
    Rejected,
    /// The sends did not complete within the configured timeout.
    TimedOut,
}

/// Result of running one submission through the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Both notifications were accepted by the provider.
    Success,
    /// Required fields were blank or malformed; nothing was sent.
    ValidationError(Validation),
    /// Provider identifiers are missing; nothing was sent.
    ConfigError {
        /// Names of the missing settings.
        missing: Vec<&'static str>,
    },
    /// The provider call failed.
    DispatchError(DispatchFailure),
}

impl SubmissionOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// The notice to show on `surface` for this outcome.
    #[must_use]
    pub fn notice(&self, surface: Surface) -> Notice {
        match self {
            Self::Success => Notice::success(surface.success_message()),
            Self::ValidationError(validation) => {
                if validation.missing.is_empty() && validation.invalid.contains(&Field::Email) {
                    Notice::error("Error", "Please enter a valid email address.")
                } else {
                    Notice::error("Error", "Please fill all required fields.")
                }
            }
            Self::ConfigError { .. } => Notice::error(
                "Configuration Error",
                "Email service configuration is missing. Please contact support.",
            ),
            Self::DispatchError(DispatchFailure::Rejected) => {
                Notice::error("Error", "Failed to send message. Please try again later.")
            }
            Self::DispatchError(DispatchFailure::TimedOut) => Notice::error(
                "Error",
                "The email service did not respond in time. Please try again later.",
            ),
        }
    }
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeVariant {
    Default,
    Destructive,
}

/// A transient toast shown once after a submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: &'static str,
    pub description: &'static str,
    pub variant: NoticeVariant,
}

impl Notice {
    const fn success(description: &'static str) -> Self {
        Self {
            title: "Success!",
            description,
            variant: NoticeVariant::Default,
        }
    }

    const fn error(title: &'static str, description: &'static str) -> Self {
        Self {
            title,
            description,
            variant: NoticeVariant::Destructive,
        }
    }

    /// Shown when a client has used up its submit budget.
    #[must_use]
    pub const fn rate_limited() -> Self {
        Self::error(
            "Too Many Requests",
            "You have sent several messages in a short time. Please wait a minute and try again.",
        )
    }

    #[must_use]
    pub fn is_destructive(&self) -> bool {
        self.variant == NoticeVariant::Destructive
    }
}
