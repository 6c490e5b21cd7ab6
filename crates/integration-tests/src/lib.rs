//! Integration tests for the GVS Controls site.
//!
//! Each test spawns the full site router on a random local port with EmailJS
//! replaced by a `wiremock` server, then drives it over HTTP with `reqwest`.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p gvs-controls-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `contact_page` - Page form submit, reset, and notices
//! - `contact_modal` - Modal open/close/toggle and submit
//! - `contact_api` - JSON endpoint status codes and rate limiting
//! - `pages` - Content pages, 404, health, and response headers

#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use gvs_controls_core::EmailRule;
use gvs_controls_site::config::{ContactConfig, EmailJsConfig, SiteConfig};
use gvs_controls_site::state::AppState;
use reqwest::header::CONTENT_TYPE;
use url::Url;
use wiremock::MockServer;

/// Service and template ids used by every spawned app.
pub const SERVICE_ID: &str = "service_gvs";
pub const CUSTOMER_TEMPLATE_ID: &str = "template_customer";
pub const OWNER_TEMPLATE_ID: &str = "template_owner";
pub const OWNER_EMAIL: &str = "gvscontrols@gmail.com";

/// Site configuration pointing EmailJS at `emailjs_url`.
#[must_use]
pub fn test_config(emailjs_url: &str) -> SiteConfig {
    let site_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../site");

    SiteConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
                content_dir: site_dir.join("content"),
        static_dir: site_dir.join("static"),
        emailjs: EmailJsConfig {
            api_url: Url::parse(&format!("{emailjs_url}/api/v1.0/email/send")).unwrap(),
            public_key: "pk_gvs_test".to_string(),
            private_key: None,
            service_id: Some(SERVICE_ID.to_string()),
            customer_template_id: Some(CUSTOMER_TEMPLATE_ID.to_string()),
            owner_template_id: Some(OWNER_TEMPLATE_ID.to_string()),
        },
        contact: ContactConfig {
            send_timeout: Duration::from_secs(5),
            email_rule: EmailRule::RequiredOnly,
            ..ContactConfig::default()
        },
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// A running site plus its mocked EmailJS server.
pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    pub emailjs: MockServer,
}

impl TestApp {
    /// Spawn with the default test configuration.
    pub async fn spawn() -> Self {
        Self::spawn_with(|_| {}).await
    }

    /// Spawn after letting the caller adjust the configuration.
    pub async fn spawn_with(customize: impl FnOnce(&mut SiteConfig)) -> Self {
        let emailjs = MockServer::start().await;
        let mut config = test_config(&emailjs.uri());
        customize(&mut config);

        let state = AppState::new(config).expect("Failed to build app state");
        let app = gvs_controls_site::app(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let address = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .unwrap();
        });

        // No proxy headers: the rate limiter keys on the peer address
        let client = reqwest::Client::new();

        Self {
            address,
            client,
            emailjs,
        }
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{path}", self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// POST an urlencoded form, as the HTMX forms do.
    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> reqwest::Response {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();

        self.client
            .post(format!("{}{path}", self.address))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header("hx-request", "true")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}{path}", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// POST JSON as a client behind a proxy that reports `client_ip`.
    pub async fn post_json_via_proxy(
        &self,
        path: &str,
        client_ip: &str,
        body: &serde_json::Value,
    ) -> reqwest::Response {
        self.client
            .post(format!("{}{path}", self.address))
            .header("x-forwarded-for", client_ip)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// JSON bodies of every request EmailJS received, in arrival order.
    pub async fn emailjs_bodies(&self) -> Vec<serde_json::Value> {
        self.emailjs
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| request.body_json::<serde_json::Value>().unwrap())
            .collect()
    }
}

/// The inquiry used throughout: Jane Doe, no phone, no subject.
#[must_use]
pub const fn jane_doe() -> [(&'static str, &'static str); 3] {
    [
        ("name", "Jane Doe"),
        ("email", "jane@example.com"),
        ("message", "Need a quote"),
    ]
}
