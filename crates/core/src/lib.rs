//! GVS Controls Core - Shared inquiry types.
//!
//! This crate provides the types used by the site binary and its tests:
//! - the inquiry form and its validation rules
//! - the notification payloads sent for one submission
//! - the view state machine shared by the contact modal and contact page
//!
//! # Architecture
//!
//! The core crate contains only types and state transitions - no I/O, no
//! HTTP clients, no timers. Callers pass `Instant`s in, which keeps every
//! transition testable without sleeping.
//!
//! # Modules
//!
//! - [`types`] - Inquiry form, email address, payloads, outcomes, view state

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
