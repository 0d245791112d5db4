mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Duration, Utc};
use serde_json::{Value, json};
use shorturls::domain::repositories::LinkRepository;

#[tokio::test]
async fn test_shorten_generated_code() {
    let (state, repo) = common::create_test_state();
    let server = common::test_server(state);

    let before = Utc::now();
    let response = server
        .post("/shorturls")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    let short_link = json["shortLink"].as_str().unwrap();
    let code = short_link
        .strip_prefix(&format!("{}/", common::BASE_URL))
        .unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));

    let expiry: DateTime<Utc> = json["expiry"].as_str().unwrap().parse().unwrap();
    assert!(expiry >= before + Duration::minutes(30) - Duration::seconds(1));
    assert!(expiry <= Utc::now() + Duration::minutes(30));
    assert!(json["expiry"].as_str().unwrap().ends_with('Z'));

    let stored = repo.find_by_code(code).await.unwrap().unwrap();
    assert_eq!(stored.original_url, "https://example.com");
    assert!(stored.clicks.is_empty());
}

#[tokio::test]
async fn test_shorten_custom_code_and_validity() {
    let (state, repo) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/shorturls")
        .json(&json!({
            "url": "https://example.com/docs?page=2",
            "validity": 5,
            "shortcode": "docs2026"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    assert_eq!(json["shortLink"], "http://sho.rt/docs2026");

    let stored = repo.find_by_code("docs2026").await.unwrap().unwrap();
    assert_eq!(stored.expiry - stored.created_at, Duration::minutes(5));
    assert_eq!(stored.original_url, "https://example.com/docs?page=2");
}

#[tokio::test]
async fn test_shorten_accepts_validity_minutes_alias() {
    let (state, repo) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/shorturls")
        .json(&json!({
            "url": "https://example.com",
            "validityMinutes": 1,
            "shortcode": "alias1"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let stored = repo.find_by_code("alias1").await.unwrap().unwrap();
    assert_eq!(stored.expiry - stored.created_at, Duration::minutes(1));
}

#[tokio::test]
async fn test_shorten_duplicate_custom_code() {
    let (state, repo) = common::create_test_state();
    let server = common::test_server(state);

    let first = server
        .post("/shorturls")
        .json(&json!({ "url": "https://first.example", "shortcode": "taken1" }))
        .await;
    first.assert_status(StatusCode::CREATED);

    let second = server
        .post("/shorturls")
        .json(&json!({ "url": "https://second.example", "shortcode": "taken1" }))
        .await;

    second.assert_status(StatusCode::CONFLICT);
    let json = second.json::<Value>();
    assert_eq!(json["error"]["code"], "conflict");
    assert_eq!(json["error"]["message"], "Shortcode already in use");

    let stored = repo.find_by_code("taken1").await.unwrap().unwrap();
    assert_eq!(stored.original_url, "https://first.example");
}

#[tokio::test]
async fn test_shorten_rejects_invalid_input() {
    let (state, repo) = common::create_test_state();
    let server = common::test_server(state);

    let cases = [
        json!({}),
        json!({ "url": "" }),
        json!({ "url": "not-a-url" }),
        json!({ "url": "ftp://files.example/a" }),
        json!({ "url": "https://example.com", "validity": 0 }),
        json!({ "url": "https://example.com", "validity": -3 }),
        json!({ "url": "https://example.com", "validity": 2.5 }),
        json!({ "url": "https://example.com", "validity": "10" }),
        json!({ "url": "https://example.com", "shortcode": "abc" }),
        json!({ "url": "https://example.com", "shortcode": "abcdefghijk" }),
        json!({ "url": "https://example.com", "shortcode": "bad-code" }),
        json!({ "url": "https://example.com", "shortcode": "" }),
    ];

    for body in cases {
        let response = server.post("/shorturls").json(&body).await;

        assert_eq!(
            response.status_code(),
            StatusCode::BAD_REQUEST,
            "body {body} was accepted"
        );
        assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");
    }

    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_shorten_rejects_route_names_as_shortcode() {
    let (state, repo) = common::create_test_state();
    let server = common::test_server(state);

    for code in ["health", "shorturls"] {
        let response = server
            .post("/shorturls")
            .json(&json!({ "url": "https://example.com", "shortcode": code }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let json = response.json::<Value>();
        assert_eq!(json["error"]["code"], "validation_error");
        assert_eq!(json["error"]["details"]["shortcode"], code);
    }

    assert_eq!(repo.count().await.unwrap(), 0);

    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "healthy");
}

#[tokio::test]
async fn test_shorten_malformed_json() {
    let (state, _repo) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/shorturls")
        .content_type("application/json")
        .bytes("{\"url\": ".into())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_shorten_store_failure_hides_details() {
    let state = common::create_state_with(
        std::sync::Arc::new(common::DownRepository),
        std::sync::Arc::new(shorturls::infrastructure::geo::NullGeoLocator::new()),
        shorturls::application::services::VisitRecordingPolicy::FailClosed,
    );
    let server = common::test_server(state);

    let response = server
        .post("/shorturls")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let text = response.text();
    assert!(!text.contains("10.0.0.5"));
    assert_eq!(response.json::<Value>()["error"]["code"], "internal_error");
}
