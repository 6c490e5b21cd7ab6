//! Integration tests for the contact modal surface.

#![allow(clippy::unwrap_used)]

use gvs_controls_integration_tests::{TestApp, jane_doe};
use reqwest::StatusCode;
use wiremock::matchers::method;
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_open_renders_dialog() {
    let app = TestApp::spawn().await;

    let html = app.get("/modal/contact").await.text().await.unwrap();

    assert!(html.contains("role=\"dialog\""));
    assert!(html.contains("value=\"open\""));
    assert!(html.contains("hx-post=\"/modal/contact\""));
    assert!(html.contains("id=\"modal-email\""));
}

#[tokio::test]
async fn test_close_removes_dialog() {
    let app = TestApp::spawn().await;

    let html = app.get("/modal/contact/close").await.text().await.unwrap();

    assert!(!html.contains("role=\"dialog\""));
    assert!(html.contains("value=\"closed\""));
}

#[tokio::test]
async fn test_toggle_flips_reported_state() {
    let app = TestApp::spawn().await;

    let opened = app
        .get("/modal/contact/toggle?state=closed")
        .await
        .text()
        .await
        .unwrap();
    assert!(opened.contains("role=\"dialog\""));

    let closed = app
        .get("/modal/contact/toggle?state=open")
        .await
        .text()
        .await
        .unwrap();
    assert!(!closed.contains("role=\"dialog\""));

    // No state yet means the modal has never been opened
    let first = app.get("/modal/contact/toggle").await.text().await.unwrap();
    assert!(first.contains("role=\"dialog\""));
}

#[tokio::test]
async fn test_toggle_rejects_unknown_state() {
    let app = TestApp::spawn().await;

    let resp = app.get("/modal/contact/toggle?state=ajar").await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_modal_submit_success_schedules_close() {
    let app = TestApp::spawn().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.emailjs)
        .await;

    let html = app
        .post_form("/modal/contact", &jane_doe())
        .await
        .text()
        .await
        .unwrap();

    assert!(html.contains("Your message has been sent."));
    assert!(html.contains("hx-get=\"/modal/contact/close\""));
    assert!(html.contains("delay:2000ms"));
}

#[tokio::test]
async fn test_modal_submit_failure_keeps_dialog_open() {
    let app = TestApp::spawn().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.emailjs)
        .await;

    let html = app
        .post_form("/modal/contact", &jane_doe())
        .await
        .text()
        .await
        .unwrap();

    assert!(html.contains("role=\"dialog\""));
    assert!(html.contains("Failed to send message. Please try again later."));
    assert!(html.contains("value=\"Jane Doe\""));
}

#[tokio::test]
async fn test_modal_validation_uses_same_rule_as_page() {
    let app = TestApp::spawn().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.emailjs)
        .await;

    let html = app
        .post_form(
            "/modal/contact",
            &[("name", ""), ("email", "jane@example.com"), ("message", "Hi")],
        )
        .await
        .text()
        .await
        .unwrap();

    assert!(html.contains("Please fill all required fields."));
}
