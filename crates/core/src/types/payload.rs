//! Outbound notification payloads.
//!
//! One submission produces two notifications with identical content: a
//! confirmation to the submitter and a lead notification to the site owner.
//! Only `to_email` differs between them.

use serde::{Deserialize, Serialize};

use super::email::Email;
use super::inquiry::InquiryForm;

/// Placeholder sent in place of blank optional fields.
pub const NOT_PROVIDED: &str = "Not provided";

/// Which copy of a submission a notification is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recipient {
    /// Confirmation sent back to the submitter.
    Customer,
    /// Lead notification sent to the fixed owner inbox.
    Owner,
}

impl Recipient {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Owner => "owner",
        }
    }
}

/// Template parameters for one notification.
///
/// Field names match the placeholders used in the provider templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateParams {
    pub from_name: String,
    pub from_email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
    pub to_email: String,
}

/// The shared content of both notifications, derived from a form at submit
/// time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionAttempt {
    from_name: String,
    from_email: String,
    phone: String,
    subject: String,
    message: String,
}

impl SubmissionAttempt {
    /// Build the attempt from a validated form.
    ///
    /// Blank `phone` and `subject` become [`NOT_PROVIDED`]; everything else
    /// is passed through as typed.
    #[must_use]
    pub fn from_form(form: &InquiryForm) -> Self {
        Self {
            from_name: form.name.clone(),
            from_email: form.email.clone(),
            phone: or_not_provided(&form.phone),
            subject: or_not_provided(&form.subject),
            message: form.message.clone(),
        }
    }

    /// Submitter's address as typed.
    #[must_use]
    pub fn from_email(&self) -> &str {
        &self.from_email
    }

    /// Parameters for the confirmation addressed to the submitter.
    #[must_use]
    pub fn customer_params(&self) -> TemplateParams {
        self.params_to(self.from_email.clone())
    }

    /// Parameters for the lead notification addressed to the owner.
    #[must_use]
    pub fn owner_params(&self, owner: &Email) -> TemplateParams {
        self.params_to(owner.as_str().to_string())
    }

    /// Parameters for either copy.
    #[must_use]
    pub fn params_for(&self, recipient: Recipient, owner: &Email) -> TemplateParams {
        match recipient {
            Recipient::Customer => self.customer_params(),
            Recipient::Owner => self.owner_params(owner),
        }
    }

    fn params_to(&self, to_email: String) -> TemplateParams {
        TemplateParams {
            from_name: self.from_name.clone(),
            from_email: self.from_email.clone(),
            phone: self.phone.clone(),
            subject: self.subject.clone(),
            message: self.message.clone(),
            to_email,
        }
    }
}

fn or_not_provided(value: &str) -> String {
    if value.is_empty() {
        NOT_PROVIDED.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn owner() -> Email {
        Email::parse("gvscontrols@gmail.com").unwrap()
    }

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
    fn test_blank_optional_fields_become_placeholder() {
        let attempt = SubmissionAttempt::from_form(&jane());
        let params = attempt.customer_params();
        assert_eq!(params.phone, "Not provided");
        assert_eq!(params.subject, "Not provided");
    }

    #[test]
    fn test_present_optional_fields_pass_through() {
        let mut form = jane();
        form.phone = "+91 9087772798".to_string();
        form.subject = "Project Consultation".to_string();

        let params = SubmissionAttempt::from_form(&form).owner_params(&owner());
        assert_eq!(params.phone, "+91 9087772798");
        assert_eq!(params.subject, "Project Consultation");
    }

    #[test]
    fn test_copies_differ_only_in_recipient() {
        let attempt = SubmissionAttempt::from_form(&jane());
        let customer = attempt.params_for(Recipient::Customer, &owner());
        let owner_copy = attempt.params_for(Recipient::Owner, &owner());

        assert_eq!(customer.to_email, "jane@example.com");
        assert_eq!(owner_copy.to_email, "gvscontrols@gmail.com");
        assert_eq!(
            TemplateParams {
                to_email: String::new(),
                ..customer
            },
            TemplateParams {
                to_email: String::new(),
                ..owner_copy
            }
        );
    }

    #[test]
    fn test_serialized_field_names() {
        let params = SubmissionAttempt::from_form(&jane()).customer_params();
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["from_name"], "Jane Doe");
        assert_eq!(json["from_email"], "jane@example.com");
        assert_eq!(json["phone"], "Not provided");
        assert_eq!(json["subject"], "Not provided");
        assert_eq!(json["message"], "Need a quote");
        assert_eq!(json["to_email"], "jane@example.com");
    }
}
