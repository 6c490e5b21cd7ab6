//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `EMAILJS_PUBLIC_KEY` - EmailJS account public key (user id)
//!
//! ## Provider identifiers
//! - `EMAILJS_SERVICE_ID` - EmailJS service id
//! - `EMAILJS_CUSTOMER_TEMPLATE_ID` - Template for the confirmation sent to the submitter
//! - `EMAILJS_OWNER_TEMPLATE_ID` - Template for the lead notification sent to the owner
//!
//! These are loaded as optional so the site still serves its pages when they
//! are absent; startup logs an error and every contact submit reports a
//! configuration error without calling the provider.
//!
//! ## Optional
//! - `SITE_HOST` - Bind address (default: 127.0.0.1)
//! - `SITE_PORT` - Listen port (default: 3000)
//! - `SITE_CONTENT_DIR` - Markdown page directory (default: crates/site/content)
//! - `SITE_STATIC_DIR` - Static asset directory (default: crates/site/static)
//! - `EMAILJS_API_URL` - Send endpoint (default: <https://api.emailjs.com/api/v1.0/email/send>)
//! - `EMAILJS_PRIVATE_KEY` - EmailJS access token for strict mode
//! - `CONTACT_OWNER_EMAIL` - Inbox that receives lead notifications (default: gvscontrols@gmail.com)
//! - `CONTACT_SEND_TIMEOUT_SECS` - Upper bound on one dispatch (default: 15)
//! - `CONTACT_EMAIL_RULE` - `required` or `syntactic` (default: required)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use gvs_controls_core::{Email, EmailRule};
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Default EmailJS REST endpoint for single sends.
pub const DEFAULT_EMAILJS_API_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Default inbox for lead notifications.
pub const DEFAULT_OWNER_EMAIL: &str = "gvscontrols@gmail.com";

/// Default upper bound on one dispatch.
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(15);

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Site application configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory holding markdown pages
    pub content_dir: PathBuf,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// EmailJS provider configuration
    pub emailjs: EmailJsConfig,
    /// Contact form behaviour
    pub contact: ContactConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// EmailJS provider configuration.
///
/// Implements `Debug` manually to redact the private key.
#[derive(Clone)]
pub struct EmailJsConfig {
    /// Send endpoint
    pub api_url: Url,
    /// Account public key, sent as `user_id`
    pub public_key: String,
    /// Optional access token, sent as `accessToken`
    pub private_key: Option<SecretString>,
    /// Service id
    pub service_id: Option<String>,
    /// Template for the confirmation sent to the submitter
    pub customer_template_id: Option<String>,
    /// Template for the lead notification sent to the owner
    pub owner_template_id: Option<String>,
}

impl std::fmt::Debug for EmailJsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailJsConfig")
            .field("api_url", &self.api_url.as_str())
            .field("public_key", &self.public_key)
            .field(
                "private_key",
                &self.private_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("service_id", &self.service_id)
            .field("customer_template_id", &self.customer_template_id)
            .field("owner_template_id", &self.owner_template_id)
            .finish()
    }
}

/// The three identifiers needed to address the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderIds {
    pub service_id: String,
    pub customer_template_id: String,
    pub owner_template_id: String,
}

/// Contact form behaviour.
#[derive(Debug, Clone)]
pub struct ContactConfig {
    /// Inbox that receives the owner copy of every submission
    pub owner_email: Email,
    /// Upper bound on one dispatch (both sends)
    pub send_timeout: Duration,
    /// Email check applied by both surfaces
    pub email_rule: EmailRule,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            owner_email: Email::parse(DEFAULT_OWNER_EMAIL)
                .unwrap_or_else(|_| unreachable!("default owner address is valid")),
            send_timeout: DEFAULT_SEND_TIMEOUT,
            email_rule: EmailRule::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the private key fails validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("SITE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SITE_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("SITE_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SITE_PORT".to_string(), e.to_string()))?;
        let content_dir = PathBuf::from(get_env_or_default(
            "SITE_CONTENT_DIR",
            "crates/site/content",
        ));
        let static_dir = PathBuf::from(get_env_or_default("SITE_STATIC_DIR", "crates/site/static"));

        let emailjs = EmailJsConfig::from_env()?;
        let contact = ContactConfig::from_env()?;

        Ok(Self {
            host,
            port,
            content_dir,
            static_dir,
            emailjs,
            contact,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl EmailJsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let api_url = Url::parse(&get_env_or_default("EMAILJS_API_URL", DEFAULT_EMAILJS_API_URL))
            .map_err(|e| {
                ConfigError::InvalidEnvVar("EMAILJS_API_URL".to_string(), e.to_string())
            })?;

        let private_key = match get_optional_env("EMAILJS_PRIVATE_KEY") {
            Some(value) => {
                validate_secret_strength(&value, "EMAILJS_PRIVATE_KEY")?;
                Some(SecretString::from(value))
            }
            None => None,
        };

        Ok(Self {
            api_url,
            public_key: get_required_env("EMAILJS_PUBLIC_KEY")?,
            private_key,
            service_id: get_optional_env("EMAILJS_SERVICE_ID"),
            customer_template_id: get_optional_env("EMAILJS_CUSTOMER_TEMPLATE_ID"),
            owner_template_id: get_optional_env("EMAILJS_OWNER_TEMPLATE_ID"),
        })
    }

    /// Resolve the three provider identifiers.
    ///
    /// # Errors
    ///
    /// Returns the environment variable names of every missing identifier.
    pub fn provider_ids(&self) -> Result<ProviderIds, Vec<&'static str>> {
        match (
            &self.service_id,
            &self.customer_template_id,
            &self.owner_template_id,
        ) {
            (Some(service), Some(customer), Some(owner)) => Ok(ProviderIds {
                service_id: service.clone(),
                customer_template_id: customer.clone(),
                owner_template_id: owner.clone(),
            }),
            _ => {
                let mut missing = Vec::new();
                if self.service_id.is_none() {
                    missing.push("EMAILJS_SERVICE_ID");
                }
                if self.customer_template_id.is_none() {
                    missing.push("EMAILJS_CUSTOMER_TEMPLATE_ID");
                }
                if self.owner_template_id.is_none() {
                    missing.push("EMAILJS_OWNER_TEMPLATE_ID");
                }
                Err(missing)
            }
        }
    }
}

impl ContactConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let owner_email = Email::parse(&get_env_or_default(
            "CONTACT_OWNER_EMAIL",
            DEFAULT_OWNER_EMAIL,
        ))
        .map_err(|e| ConfigError::InvalidEnvVar("CONTACT_OWNER_EMAIL".to_string(), e.to_string()))?;

        let send_timeout = match get_optional_env("CONTACT_SEND_TIMEOUT_SECS") {
            Some(value) => {
                let secs = value.parse::<u64>().map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        "CONTACT_SEND_TIMEOUT_SECS".to_string(),
                        e.to_string(),
                    )
                })?;
                if secs == 0 {
                    return Err(ConfigError::InvalidEnvVar(
                        "CONTACT_SEND_TIMEOUT_SECS".to_string(),
                        "must be greater than zero".to_string(),
                    ));
                }
                Duration::from_secs(secs)
            }
            None => DEFAULT_SEND_TIMEOUT,
        };

        let email_rule = get_env_or_default("CONTACT_EMAIL_RULE", "required")
            .parse::<EmailRule>()
            .map_err(|e| ConfigError::InvalidEnvVar("CONTACT_EMAIL_RULE".to_string(), e))?;

        Ok(Self {
            owner_email,
            send_timeout,
            email_rule,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    get_optional_env(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable. Blank values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use the key generated by the provider."
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn emailjs(service: Option<&str>, customer: Option<&str>, owner: Option<&str>) -> EmailJsConfig {
        EmailJsConfig {
            api_url: Url::parse(DEFAULT_EMAILJS_API_URL).unwrap(),
            public_key: "pk_live_123".to_string(),
            private_key: None,
            service_id: service.map(String::from),
            customer_template_id: customer.map(String::from),
            owner_template_id: owner.map(String::from),
        }
    }

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-private-key", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        let result = validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_provider_ids_complete() {
        let ids = emailjs(Some("service_gvs"), Some("template_cust"), Some("template_own"))
            .provider_ids()
            .unwrap();
        assert_eq!(ids.service_id, "service_gvs");
        assert_eq!(ids.owner_template_id, "template_own");
    }

    #[test]
    fn test_provider_ids_reports_every_missing_id() {
        let missing = emailjs(None, Some("template_cust"), None)
            .provider_ids()
            .unwrap_err();
        assert_eq!(
            missing,
            vec!["EMAILJS_SERVICE_ID", "EMAILJS_OWNER_TEMPLATE_ID"]
        );
    }

    #[test]
    fn test_emailjs_debug_redacts_private_key() {
        let mut config = emailjs(Some("service_gvs"), None, None);
        config.private_key = Some(SecretString::from("super_private_access_token"));

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("service_gvs"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_private_access_token"));
    }

    #[test]
    fn test_contact_config_default() {
        let contact = ContactConfig::default();
        assert_eq!(contact.owner_email.as_str(), DEFAULT_OWNER_EMAIL);
        assert_eq!(contact.send_timeout, Duration::from_secs(15));
        assert_eq!(contact.email_rule, EmailRule::RequiredOnly);
    }

    #[test]
    fn test_socket_addr() {
        let config = SiteConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            content_dir: PathBuf::from("content"),
            static_dir: PathBuf::from("static"),
            emailjs: emailjs(None, None, None),
            contact: ContactConfig::default(),
            sentry_dsn: None,
            sentry_environment: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }
}
