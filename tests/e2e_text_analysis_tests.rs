//! End-to-end text analysis tests

mod common;

use common::client::TestClient;
use common::constants::TEST_USER_ID;
use common::server::TestServer;
use reqwest::StatusCode;

#[tokio::test]
async fn positive_text_yields_happy_analysis() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated(server.base_url.clone());

    let response = client.analyze_text("I feel fantastic today").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["mood"], "happy");
    assert_eq!(body["score"], 10);
    assert_eq!(body["energy"], 7);
    assert_eq!(body["emotional_state"], "joy");
    assert_eq!(
        body["detected_emotions"],
        serde_json::json!(["joy", "optimism", "surprise"])
    );
    assert_eq!(body["user_id"], TEST_USER_ID);

    let sentiment = body["sentimentScore"].as_f64().unwrap();
    assert!((sentiment - 0.9).abs() < 1e-6, "sentiment was {sentiment}");
}

#[tokio::test]
async fn angry_emotions_override_the_sentiment_mood() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated(server.base_url.clone());

    let response = client.analyze_text("I am furious about the delay").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["mood"], "angry");
    assert_eq!(body["score"], 8);
    assert_eq!(body["energy"], 4);
    assert_eq!(body["emotional_state"], "anger");
}

#[tokio::test]
async fn empty_text_is_rejected() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated(server.base_url.clone());

    let response = client.analyze_text("   ").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "Text is required");
}

#[tokio::test]
async fn missing_text_field_is_rejected() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated(server.base_url.clone());

    let response = client
        .client
        .post(format!("{}/v1/analysis/text", server.base_url))
        .header(
            "Authorization",
            format!("Bearer {}", client.token.clone().unwrap()),
        )
        .json(&serde_json::json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "Text is required");
}
