//! Core types for the GVS Controls site.
//!
//! This module provides the inquiry form, its validation, the outbound
//! payloads, and the view state shared by both contact surfaces.

pub mod email;
pub mod inquiry;
pub mod modal;
pub mod outcome;
pub mod payload;
pub mod view;

pub use email::{Email, EmailError};
pub use inquiry::{EmailRule, Field, InquiryForm, Subject, UnknownField, Validation};
pub use modal::ContactModal;
pub use outcome::{DispatchFailure, Notice, NoticeVariant, SubmissionOutcome};
pub use payload::{NOT_PROVIDED, Recipient, SubmissionAttempt, TemplateParams};
pub use view::{AfterSubmit, InvalidTransition, Surface, SubmissionView, ViewState};
