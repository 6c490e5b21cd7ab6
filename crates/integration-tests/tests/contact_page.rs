//! Integration tests for the contact page surface.

#![allow(clippy::unwrap_used)]

use gvs_controls_integration_tests::{
    CUSTOMER_TEMPLATE_ID, OWNER_EMAIL, OWNER_TEMPLATE_ID, SERVICE_ID, TestApp, jane_doe,
};
use reqwest::StatusCode;
use serde_json::Value;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

fn for_template(bodies: &[Value], template_id: &str) -> Value {
    bodies
        .iter()
        .find(|b| b["template_id"] == template_id)
        .cloned()
        .unwrap_or_else(|| panic!("no send for {template_id}"))
}

#[tokio::test]
async fn test_contact_page_renders_form_and_office_details() {
    let app = TestApp::spawn().await;

    let resp = app.get("/contact").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = resp.text().await.unwrap();
    assert!(html.contains("id=\"contact-panel\""));
    assert!(html.contains("hx-post=\"/contact\""));
    assert!(html.contains("Maraimalai Nagar"));
    assert!(html.contains("+91 9087772798"));
    assert!(html.contains("Project Consultation"));
}

#[tokio::test]
async fn test_jane_doe_success_sends_both_copies() {
    let app = TestApp::spawn().await;
    Mock::given(method("POST"))
        .and(path("/api/v1.0/email/send"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(2)
        .mount(&app.emailjs)
        .await;

    let resp = app.post_form("/contact", &jane_doe()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = resp.text().await.unwrap();
    assert!(html.contains("Your message has been sent."));
    assert!(html.contains("hx-get=\"/contact/form\""));
    assert!(html.contains("delay:5000ms"));

    let bodies = app.emailjs_bodies().await;
    assert_eq!(bodies.len(), 2);

    let customer = for_template(&bodies, CUSTOMER_TEMPLATE_ID);
    assert_eq!(customer["service_id"], SERVICE_ID);
    assert_eq!(customer["user_id"], "pk_gvs_test");
    assert_eq!(customer["template_params"]["to_email"], "jane@example.com");
    assert_eq!(customer["template_params"]["from_name"], "Jane Doe");
    assert_eq!(customer["template_params"]["phone"], "Not provided");
    assert_eq!(customer["template_params"]["subject"], "Not provided");
    assert_eq!(customer["template_params"]["message"], "Need a quote");

    let owner = for_template(&bodies, OWNER_TEMPLATE_ID);
    assert_eq!(owner["template_params"]["to_email"], OWNER_EMAIL);
    assert_eq!(owner["template_params"]["from_email"], "jane@example.com");
}

#[tokio::test]
async fn test_direct_submit_without_proxy_headers_is_sent() {
    let app = TestApp::spawn().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.emailjs)
        .await;

    // A browser talking straight to the server, no proxy in front
    let body = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(jane_doe())
        .finish();
    let resp = reqwest::Client::new()
        .post(format!("{}/contact", app.address))
        .header("content-type", "application/x-www-form-urlencoded")
        .body(body)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains("Your message has been sent."));
    assert_eq!(app.emailjs_bodies().await.len(), 2);
}

#[tokio::test]
async fn test_provided_phone_and_subject_are_sent_verbatim() {
    let app = TestApp::spawn().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.emailjs)
        .await;

    let mut fields = jane_doe().to_vec();
    fields.push(("phone", "+91 98765 43210"));
    fields.push(("subject", "Service Request"));
    app.post_form("/contact", &fields).await;

    for body in app.emailjs_bodies().await {
        assert_eq!(body["template_params"]["phone"], "+91 98765 43210");
        assert_eq!(body["template_params"]["subject"], "Service Request");
    }
}

#[tokio::test]
async fn test_owner_rejection_keeps_form_values() {
    let app = TestApp::spawn().await;
    Mock::given(method("POST"))
        .and(body_partial_json(
            serde_json::json!({ "template_id": CUSTOMER_TEMPLATE_ID }),
        ))
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.emailjs)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(
            serde_json::json!({ "template_id": OWNER_TEMPLATE_ID }),
        ))
        .respond_with(ResponseTemplate::new(400).set_body_string("The template ID is invalid"))
        .mount(&app.emailjs)
        .await;

    let resp = app.post_form("/contact", &jane_doe()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = resp.text().await.unwrap();
    assert!(html.contains("Failed to send message. Please try again later."));
    assert!(html.contains("value=\"Jane Doe\""));
    assert!(html.contains("value=\"jane@example.com\""));
    assert!(html.contains("Need a quote"));
    assert!(!html.contains("The template ID is invalid"));
}

#[tokio::test]
async fn test_missing_required_field_makes_no_calls() {
    let app = TestApp::spawn().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.emailjs)
        .await;

    let resp = app
        .post_form(
            "/contact",
            &[
                ("name", "Jane Doe"),
                ("email", "jane@example.com"),
                ("message", "   "),
            ],
        )
        .await;

    let html = resp.text().await.unwrap();
    assert!(html.contains("Please fill all required fields."));
    assert!(html.contains("value=\"Jane Doe\""));
}

#[tokio::test]
async fn test_missing_provider_ids_fail_fast() {
    let app = TestApp::spawn_with(|config| {
        config.emailjs.owner_template_id = None;
    })
    .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.emailjs)
        .await;

    let html = app
        .post_form("/contact", &jane_doe())
        .await
        .text()
        .await
        .unwrap();

    assert!(html.contains("Configuration Error"));
    assert!(html.contains("value=\"Jane Doe\""));
}

#[tokio::test]
async fn test_form_reset_returns_empty_form() {
    let app = TestApp::spawn().await;

    let resp = app.get("/contact/form").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = resp.text().await.unwrap();
    assert!(html.contains("id=\"contact-form\""));
    assert!(html.contains("id=\"name\" name=\"name\" type=\"text\" required value=\"\""));
    assert!(!html.contains("role=\"alert\""));
}
