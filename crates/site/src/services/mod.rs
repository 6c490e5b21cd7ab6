//! Business logic services for the site.
//!
//! # Services
//!
//! - `emailjs` - EmailJS REST client (one templated send per call)
//! - `dispatcher` - Sends the customer and owner copies of a submission concurrently
//! - `submission` - Validation, configuration check, and dispatch shared by both contact surfaces

pub mod dispatcher;
pub mod emailjs;
pub mod submission;

pub use dispatcher::{DispatchError, InquiryDispatcher};
pub use emailjs::{EmailJsClient, EmailJsError};
pub use submission::SubmissionController;
