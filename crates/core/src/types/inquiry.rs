//! Inquiry form state and validation.
//!
//! An [`InquiryForm`] holds the raw text a visitor has typed into either
//! contact surface. It is never persisted: it is edited field by field,
//! validated at submit time, and cleared after a successful dispatch.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::email::Email;

/// A single field of the inquiry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Phone,
    Subject,
    Message,
}

impl Field {
    /// Fields that must be non-blank before a submission may be dispatched.
    pub const REQUIRED: [Self; 3] = [Self::Name, Self::Email, Self::Message];

    /// Form field name as used in HTML and JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Phone => "Phone Number",
            Self::Subject => "Subject",
            Self::Message => "Message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a field name is not part of the inquiry form.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown form field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            "subject" => Ok(Self::Subject),
            "message" => Ok(Self::Message),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

/// The fixed set of inquiry subjects offered by the subject selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    #[serde(rename = "General Inquiry")]
    GeneralInquiry,
    #[serde(rename = "Project Consultation")]
    ProjectConsultation,
    #[serde(rename = "Product Information")]
    ProductInformation,
    #[serde(rename = "Service Request")]
    ServiceRequest,
    Other,
}

impl Subject {
    /// All subjects in display order.
    pub const ALL: [Self; 5] = [
        Self::GeneralInquiry,
        Self::ProjectConsultation,
        Self::ProductInformation,
        Self::ServiceRequest,
        Self::Other,
    ];

    /// The option value and label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GeneralInquiry => "General Inquiry",
            Self::ProjectConsultation => "Project Consultation",
            Self::ProductInformation => "Product Information",
            Self::ServiceRequest => "Service Request",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Subject {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|subject| subject.as_str() == s).ok_or(())
    }
}

/// How strictly the email field is checked at submit time.
///
/// Both contact surfaces must use the same rule; the site reads it from
/// configuration so the choice is visible in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmailRule {
    /// Only require a non-blank value and leave format checks to the
    /// browser's `type="email"` input.
    #[default]
    RequiredOnly,
    /// Additionally require `local@domain` shape via [`Email::parse`].
    Syntactic,
}

impl FromStr for EmailRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "required" | "required_only" => Ok(Self::RequiredOnly),
            "syntactic" | "strict" => Ok(Self::Syntactic),
            other => Err(format!(
                "expected 'required' or 'syntactic', got '{other}'"
            )),
        }
    }
}

/// Result of validating an [`InquiryForm`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Validation {
    /// Required fields that are empty or whitespace-only.
    pub missing: Vec<Field>,
    /// Fields that are present but malformed.
    pub invalid: Vec<Field>,
}

impl Validation {
    /// Whether the form may be dispatched.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.missing.is_empty() && self.invalid.is_empty()
    }
}

/// Raw contents of the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InquiryForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

impl InquiryForm {
    /// Replace the value of a single field. Other fields are untouched.
    pub fn update_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
            Field::Subject => self.subject = value,
            Field::Message => self.message = value,
        }
    }

    /// Current value of a field.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    /// Reset every field to empty.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// The selected subject, if it is one of the known options.
    #[must_use]
    pub fn known_subject(&self) -> Option<Subject> {
        self.subject.trim().parse().ok()
    }

    /// Check the form before dispatch.
    ///
    /// `name`, `email` and `message` must be non-blank. With
    /// [`EmailRule::Syntactic`] a present email must also parse as an
    /// [`Email`].
    #[must_use]
    pub fn validate(&self, rule: EmailRule) -> Validation {
        let missing: Vec<Field> = Field::REQUIRED
            .into_iter()
            .filter(|field| self.get(*field).trim().is_empty())
            .collect();

        let mut invalid = Vec::new();
        if rule == EmailRule::Syntactic
            && !missing.contains(&Field::Email)
            && Email::parse(&self.email).is_err()
        {
            invalid.push(Field::Email);
        }

        Validation { missing, invalid }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn jane() -> InquiryForm {
        InquiryForm {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: String::new(),
            subject: String::new(),
            message: "Need a quote".to_string(),
        }
    }

    #[test]
    fn test_update_field_touches_only_that_field() {
        let mut form = jane();
        form.update_field(Field::Phone, "+91 9087772798");
        assert_eq!(form.phone, "+91 9087772798");
        assert_eq!(form.name, "Jane Doe");
        assert_eq!(form.message, "Need a quote");

        form.update_field(Field::Phone, "123");
        assert_eq!(form.get(Field::Phone), "123");
    }

    #[test]
    fn test_valid_form() {
        assert!(jane().validate(EmailRule::RequiredOnly).is_valid());
        assert!(jane().validate(EmailRule::Syntactic).is_valid());
    }

    #[test]
    fn test_blank_required_fields_are_missing() {
        for field in Field::REQUIRED {
            for blank in ["", "   ", "\n\t"] {
                let mut form = jane();
                form.update_field(field, blank);
                let validation = form.validate(EmailRule::RequiredOnly);
                assert!(!validation.is_valid(), "{field} = {blank:?}");
                assert_eq!(validation.missing, vec![field]);
            }
        }
    }

    #[test]
    fn test_empty_form_reports_all_required_fields() {
        let validation = InquiryForm::default().validate(EmailRule::Syntactic);
        assert_eq!(validation.missing, Field::REQUIRED.to_vec());
        // A missing email is not also reported as malformed
        assert!(validation.invalid.is_empty());
    }

    #[test]
    fn test_optional_fields_do_not_block() {
        let mut form = jane();
        form.update_field(Field::Phone, "");
        form.update_field(Field::Subject, "");
        assert!(form.validate(EmailRule::RequiredOnly).is_valid());
    }

    #[test]
    fn test_email_rule_is_a_parameter() {
        let mut form = jane();
        form.update_field(Field::Email, "jane-at-example");

        assert!(form.validate(EmailRule::RequiredOnly).is_valid());

        let strict = form.validate(EmailRule::Syntactic);
        assert_eq!(strict.invalid, vec![Field::Email]);
        assert!(strict.missing.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut form = jane();
        form.clear();
        assert_eq!(form, InquiryForm::default());
    }

    #[test]
    fn test_known_subject() {
        let mut form = jane();
        assert_eq!(form.known_subject(), None);
        form.update_field(Field::Subject, "Service Request");
        assert_eq!(form.known_subject(), Some(Subject::ServiceRequest));
        form.update_field(Field::Subject, "Something else");
        assert_eq!(form.known_subject(), None);
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("message".parse::<Field>().unwrap(), Field::Message);
        assert!("company".parse::<Field>().is_err());
    }

    #[test]
    fn test_email_rule_from_str() {
        assert_eq!("required".parse::<EmailRule>(), Ok(EmailRule::RequiredOnly));
        assert_eq!(" Syntactic ".parse::<EmailRule>(), Ok(EmailRule::Syntactic));
        assert!("regex".parse::<EmailRule>().is_err());
    }

    #[test]
    fn test_deserialize_partial_form() {
        let form: InquiryForm =
            serde_json::from_str(r#"{"name":"Jane Doe","message":"Hi"}"#).unwrap();
        assert_eq!(form.email, "");
        assert_eq!(form.subject, "");
    }
}
