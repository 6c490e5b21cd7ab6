//! Email addresses as they arrive from the inquiry form and configuration.
//!
//! Visitors type their address by hand, so parsing forgives surrounding
//! whitespace but rejects anything that cannot be a single `mailbox@domain`.
//! The same type holds the owner inbox that receives every lead.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Why a typed address was rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("email address is blank")]
    Blank,
    #[error("email address is longer than {max} characters")]
    TooLong { max: usize },
    /// Spaces inside the address, usually a name pasted into the field.
    #[error("email address contains whitespace")]
    Whitespace,
    /// No `@`, or more than one.
    #[error("email address must contain exactly one @")]
    NotOneAt,
    #[error("email address has nothing before the @")]
    MissingMailbox,
    #[error("email address has nothing after the @")]
    MissingDomain,
}

/// A syntactically plausible email address.
///
/// Deliverability is never checked; the provider finds out when it sends.
///
/// ```
/// use gvs_controls_core::Email;
///
/// let email = Email::parse("  jane@example.com ").unwrap();
/// assert_eq!(email.as_str(), "jane@example.com");
/// assert!(Email::parse("Jane Doe").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Longest address a mail server accepts (RFC 5321 path limit).
    pub const MAX_LENGTH: usize = 254;

    /// Parse a typed address, ignoring leading and trailing whitespace.
    ///
    /// # Errors
    ///
    /// Returns the first [`EmailError`] the input runs into.
    pub fn parse(input: &str) -> Result<Self, EmailError> {
        let address = input.trim();
        if address.is_empty() {
            return Err(EmailError::Blank);
        }
        if address.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        if address.chars().any(char::is_whitespace) {
            return Err(EmailError::Whitespace);
        }

        let (mailbox, domain) = address.split_once('@').ok_or(EmailError::NotOneAt)?;
        if domain.contains('@') {
            return Err(EmailError::NotOneAt);
        }
        if mailbox.is_empty() {
            return Err(EmailError::MissingMailbox);
        }
        if domain.is_empty() {
            return Err(EmailError::MissingDomain);
        }

        Ok(Self(address.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}
