use serde_json::json;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockBuilder, ResponseTemplate};

use crate::helpers::{spawn_app, ALLOWED_ORIGIN, RECIPIENT};

fn when_sending_an_email() -> MockBuilder {
    Mock::given(path("/email")).and(method("POST"))
}

fn assert_cors_headers(response: &reqwest::Response) {
    let headers = response.headers();
    assert_eq!(headers["Access-Control-Allow-Origin"], ALLOWED_ORIGIN);
    assert_eq!(headers["Access-Control-Allow-Headers"], "Content-Type");
    assert_eq!(headers["Access-Control-Allow-Methods"], "POST, OPTIONS");
}

fn valid_submission() -> serde_json::Value {
    json!({
        "name": "John Doe",
        "email": "john@example.com",
        "message": "I would like a quote for my garden please.",
    })
}

#[tokio::test]
async fn a_valid_submission_is_relayed_and_returns_200() {
    // arrange
    let app = spawn_app().await;
    when_sending_an_email()
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    // act
    let response = app.post_contact(&valid_submission()).await;

    // assert
    assert_eq!(200, response.status().as_u16());
    assert_cors_headers(&response);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({"message": "Message sent successfully"}));
}

#[tokio::test]
async fn the_relayed_email_is_addressed_to_the_business_with_the_sender_as_reply_to() {
    // arrange
    let app = spawn_app().await;
    when_sending_an_email()
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    // act
    app.post_contact(&json!({
        "name": "John Doe",
        "email": "John@Example.com",
        "phone": "07777123456",
        "service": "Landscape Gardening",
        "message": "I would like a quote for my garden please.",
    }))
    .await;

    // assert
    let email_request = &app.email_server.received_requests().await.unwrap()[0];
    let body: serde_json::Value = serde_json::from_slice(&email_request.body).unwrap();
    assert_eq!(body["To"], RECIPIENT);
    assert_eq!(body["ReplyTo"], "john@example.com");
    assert_eq!(body["Subject"], "New Contact Form Submission - John Doe");
    let text_body = body["TextBody"].as_str().unwrap();
    assert!(text_body.contains("Phone: 07777123456"));
    assert!(text_body.contains("Service: Landscape Gardening"));
}

#[tokio::test]
async fn missing_required_fields_return_400_with_every_field_error() {
    // arrange
    let app = spawn_app().await;
    when_sending_an_email()
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    // act
    let response = app
        .post_contact(&json!({"name": "", "email": "", "message": ""}))
        .await;

    // assert
    assert_eq!(400, response.status().as_u16());
    assert_cors_headers(&response);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "error": "Validation failed",
            "errors": [
                {"field": "name", "message": "Name is required"},
                {"field": "email", "message": "Email is required"},
                {"field": "message", "message": "Message is required"},
            ]
        })
    );
}

#[tokio::test]
async fn invalid_fields_return_400_naming_only_the_offending_field() {
    // arrange
    let app = spawn_app().await;
    let test_cases = vec![
        (
            json!({"name": "John", "email": "not-an-email", "message": "This is a test message for validation."}),
            "email",
            "Please enter a valid email address",
        ),
        (
            json!({"name": "X", "email": "x@x.com", "message": "Hi", "honeypot": ""}),
            "message",
            "Message must be at least 10 characters",
        ),
        (
            json!({"email": "x@x.com", "message": "This is a test message for validation."}),
            "name",
            "Name is required",
        ),
    ];

    for (invalid_body, field, message) in test_cases {
        // act
        let response = app.post_contact(&invalid_body).await;

        // assert
        assert_eq!(
            400,
            response.status().as_u16(),
            "API did not fail with 400 when payload was {}",
            invalid_body
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["errors"], json!([{"field": field, "message": message}]));
    }
}

#[tokio::test]
async fn malformed_json_returns_400() {
    // arrange
    let app = spawn_app().await;

    // act
    let response = app.post_contact_raw(r#"{"name": "John""#).await;

    // assert
    assert_eq!(400, response.status().as_u16());
    assert_cors_headers(&response);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": "Invalid JSON in request body"}));
}

#[tokio::test]
async fn a_body_that_is_not_an_object_fails_validation() {
    // arrange
    let app = spawn_app().await;

    for raw_body in ["", "null", "[1, 2, 3]", "\"hello\""] {
        // act
        let response = app.post_contact_raw(raw_body).await;

        // assert
        assert_eq!(400, response.status().as_u16(), "body was {:?}", raw_body);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(
            body,
            json!({
                "error": "Validation failed",
                "errors": [{"field": "body", "message": "Invalid request body"}]
            })
        );
    }
}

#[tokio::test]
async fn a_filled_honeypot_returns_200_without_sending_an_email() {
    // arrange
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;
    let test_cases = vec![
        json!({"name": "Spammer", "email": "spam@spam.com", "message": "Buy my products!", "honeypot": "bot"}),
        json!({"name": "", "email": "not-an-email", "message": "", "honeypot": "I am a bot"}),
    ];

    for spam in test_cases {
        // act
        let response = app.post_contact(&spam).await;

        // assert
        assert_eq!(200, response.status().as_u16());
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body, json!({"message": "Message sent successfully"}));
    }
}

#[tokio::test]
async fn a_provider_failure_returns_500_without_leaking_the_cause() {
    // arrange
    let app = spawn_app().await;
    when_sending_an_email()
        .respond_with(ResponseTemplate::new(500).set_body_string("smtp relay exploded"))
        .expect(1)
        .mount(&app.email_server)
        .await;

    // act
    let response = app.post_contact(&valid_submission()).await;

    // assert
    assert_eq!(500, response.status().as_u16());
    assert_cors_headers(&response);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({"error": "Failed to send message. Please try again or contact us directly."})
    );
}

#[tokio::test]
async fn a_failed_send_is_not_retried() {
    // arrange
    let app = spawn_app().await;
    when_sending_an_email()
        .respond_with(ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(5)))
        .expect(1)
        .mount(&app.email_server)
        .await;

    // act
    let response = app.post_contact(&valid_submission()).await;

    // assert
    assert_eq!(500, response.status().as_u16());
}

#[tokio::test]
async fn preflight_returns_200_with_an_empty_body_and_cors_headers() {
    // arrange
    let app = spawn_app().await;

    // act
    let response = app.contact_with_method(reqwest::Method::OPTIONS).await;

    // assert
    assert_eq!(200, response.status().as_u16());
    assert_cors_headers(&response);
    assert_eq!(Some(0), response.content_length());
}

#[tokio::test]
async fn other_methods_return_405() {
    // arrange
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    for method in [
        reqwest::Method::GET,
        reqwest::Method::PUT,
        reqwest::Method::DELETE,
        reqwest::Method::PATCH,
    ] {
        // act
        let response = app.contact_with_method(method.clone()).await;

        // assert
        assert_eq!(
            405,
            response.status().as_u16(),
            "{} was not rejected",
            method
        );
        assert_cors_headers(&response);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body, json!({"error": "Method not allowed"}));
    }
}
