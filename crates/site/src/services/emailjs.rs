//! EmailJS REST API client.
//!
//! Sends one templated email per call through the provider's
//! `/api/v1.0/email/send` endpoint. The provider renders the template and
//! delivers the message; a 2xx response means it accepted the send.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use thiserror::Error;
use url::Url;

use gvs_controls_core::TemplateParams;

use crate::config::EmailJsConfig;

/// Errors that can occur when interacting with the EmailJS API.
#[derive(Debug, Error)]
pub enum EmailJsError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

impl EmailJsError {
    /// HTTP status returned by the provider, if it answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(_) => None,
        }
    }
}

/// Request body for a single send.
#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
    template_params: &'a TemplateParams,
}

/// EmailJS API client.
#[derive(Clone)]
pub struct EmailJsClient {
    client: reqwest::Client,
    api_url: Url,
    public_key: String,
    private_key: Option<SecretString>,
}

impl EmailJsClient {
    /// Create a new EmailJS API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &EmailJsConfig) -> Result<Self, EmailJsError> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            public_key: config.public_key.clone(),
            private_key: config.private_key.clone(),
        })
    }

    /// Send one templated email.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the API answers with a
    /// non-success status.
    pub async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &TemplateParams,
    ) -> Result<(), EmailJsError> {
        let body = SendRequest {
            service_id,
            template_id,
            user_id: &self.public_key,
            access_token: self.private_key.as_ref().map(|k| k.expose_secret()),
            template_params: params,
        };

        let response = self
            .client
            .post(self.api_url.clone())
            .json(&body)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EmailJsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        tracing::debug!(template_id, "EmailJS accepted send");
        Ok(())
    }
}
