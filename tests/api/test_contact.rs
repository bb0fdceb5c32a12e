use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::FirstName;
use fake::Fake;
use serde_json::{json, Value};

use crate::helpers::spawn_app;

#[tokio::test]
async fn test_valid_submission_returns_200_and_sends_one_email() {
    let app = spawn_app().await;
    let name: String = FirstName().fake();
    let email: String = SafeEmail().fake();
    let body = json!({
        "name": name,
        "email": email,
        "message": "Hi, I saw your portfolio and would like to talk."
    });

    let response = app.post_contact(&body).await;

    assert_eq!(200, response.status().as_u16());
    let payload: Value = response.json().await.expect("Failed to parse response body");
    assert_eq!(payload, json!({ "success": true }));

    assert_eq!(app.mailer.attempts(), 1);
    let sent = app.mailer.sent();
    let (recipient, composed) = &sent[0];
    assert_eq!(recipient, "owner@example.com");
    assert_eq!(composed.reply_to, email);
    assert_eq!(composed.subject, format!("Contact Form - {}", name));
}

#[tokio::test]
async fn test_missing_required_field_returns_400_without_touching_the_transport() {
    let app = spawn_app().await;
    let cases = vec![
        (
            json!({ "name": "", "email": "a@b.com", "message": "Hi" }),
            "empty name",
        ),
        (
            json!({ "name": "Ann", "email": "a@b.com" }),
            "missing message",
        ),
        (
            json!({ "name": "Ann", "message": "Hi" }),
            "missing email",
        ),
        (
            json!({ "name": "   ", "email": "a@b.com", "message": "Hi" }),
            "whitespace-only name",
        ),
    ];

    for (body, description) in cases {
        let response = app.post_contact(&body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "did not reject a submission with {}",
            description
        );
        let payload: Value = response.json().await.expect("Failed to parse response body");
        assert_eq!(
            payload,
            json!({ "success": false, "error": "Missing required fields" })
        );
    }

    assert_eq!(app.mailer.attempts(), 0);
}

#[tokio::test]
async fn test_empty_body_is_treated_as_a_missing_field_set() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .post(&format!("{}/api/contact", &app.address))
        .header("Content-Type", "application/json")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(400, response.status().as_u16());
    assert_eq!(app.mailer.attempts(), 0);
}

#[tokio::test]
async fn test_fields_are_sanitized_before_the_email_is_composed() {
    let app = spawn_app().await;
    let body = json!({
        "name": "<b>Ann</b>",
        "email": "a@b.com",
        "message": "x".repeat(2000)
    });

    let response = app.post_contact(&body).await;

    assert_eq!(200, response.status().as_u16());
    let sent = app.mailer.sent();
    let (_, composed) = &sent[0];
    assert_eq!(composed.subject, "Contact Form - bAnn/b");
    assert!(!composed.html_body.contains("<b>"));
    assert!(composed.html_body.contains(&"x".repeat(1000)));
    assert!(!composed.html_body.contains(&"x".repeat(1001)));
}

#[tokio::test]
async fn test_optional_fields_shape_the_composed_email() {
    let app = spawn_app().await;
    let body = json!({
        "name": "Ann",
        "email": "a@b.com",
        "subject": "Collaboration",
        "message": "Hi",
        "phone": "+911234567890"
    });

    app.post_contact(&body).await;

    let sent = app.mailer.sent();
    let (_, composed) = &sent[0];
    assert_eq!(composed.subject, "Collaboration - Contact Form - Ann");
    assert!(composed.html_body.contains("+911234567890"));
}

#[tokio::test]
async fn test_transport_failure_returns_500_with_a_generic_error() {
    let app = spawn_app().await;
    app.mailer.fail_sends();
    let body = json!({
        "name": "Ann",
        "email": "a@b.com",
        "message": "Hi"
    });

    let response = app.post_contact(&body).await;

    assert_eq!(500, response.status().as_u16());
    let payload: Value = response.json().await.expect("Failed to parse response body");
    assert_eq!(
        payload,
        json!({ "success": false, "error": "Failed to send email" })
    );
    // The relay's own error text must never reach the caller
    assert_eq!(app.mailer.attempts(), 1);
}

#[tokio::test]
async fn test_options_request_returns_200_without_side_effects() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .request(
            reqwest::Method::OPTIONS,
            &format!("{}/api/contact", &app.address),
        )
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(200, response.status().as_u16());
    assert_eq!(Some(0), response.content_length());
    assert_eq!(app.mailer.attempts(), 0);
}

#[tokio::test]
async fn test_get_request_returns_the_service_identity() {
    let app = spawn_app().await;

    let response = app.get_contact().await;

    assert_eq!(200, response.status().as_u16());
    let payload: Value = response.json().await.expect("Failed to parse response body");
    assert_eq!(payload["success"], json!(true));
    assert!(!payload["message"].as_str().unwrap().is_empty());
    assert_eq!(app.mailer.attempts(), 0);
}

#[tokio::test]
async fn test_unsupported_method_returns_405() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .put(&format!("{}/api/contact", &app.address))
        .json(&json!({ "name": "Ann", "email": "a@b.com", "message": "Hi" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(405, response.status().as_u16());
    let payload: Value = response.json().await.expect("Failed to parse response body");
    assert_eq!(
        payload,
        json!({ "success": false, "error": "Method not allowed" })
    );
    assert_eq!(app.mailer.attempts(), 0);
}

#[tokio::test]
async fn test_responses_carry_permissive_cors_headers() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .get(&format!("{}/api/contact", &app.address))
        .header("Origin", "http://localhost:5173")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
