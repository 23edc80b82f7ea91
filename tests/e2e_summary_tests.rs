//! End-to-end weekly summary tests

mod common;

use common::client::TestClient;
use common::constants::TEST_USER_ID;
use common::server::TestServer;
use reqwest::StatusCode;
use serde_json::json;

fn check_in(day: u32, mood: &str, score: f64, energy: f64) -> serde_json::Value {
    json!({
        "createdAt": format!("2024-03-{:02}T12:00:00Z", day),
        "mood": mood,
        "moodScore": score,
        "energyLevel": energy,
    })
}

#[tokio::test]
async fn rising_scores_report_an_improving_trend() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated(server.base_url.clone());

    let check_ins = json!([
        check_in(1, "sad", 3.0, 4.0),
        check_in(2, "neutral", 5.0, 5.0),
        check_in(3, "happy", 8.0, 6.0),
    ]);
    let response = client.summary(check_ins).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["user_id"], TEST_USER_ID);

    let insights = body["insights"].as_str().unwrap();
    assert!(insights.starts_with(
        "This week, your average mood score was 5.3/10 and your average energy level was 5.0/10. "
    ));
    assert!(insights.contains("You most frequently reported feeling sad. "));
    assert!(insights.contains("Your mood has been improving over the week. "));

    let recommendations = body["recommendations"].as_str().unwrap();
    assert!(recommendations
        .starts_with("Based on your mood patterns this week, consider the following:\n\n"));
    assert!(recommendations.contains("• Your mood has been moderate."));
}

#[tokio::test]
async fn low_scores_and_energy_pick_the_low_bullets() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated(server.base_url.clone());

    let check_ins = json!([
        check_in(1, "sad", 3.0, 2.0),
        check_in(2, "sad", 2.0, 3.0),
    ]);
    let response = client.summary(check_ins).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    let insights = body["insights"].as_str().unwrap();
    // Two check-ins are not enough to call a trend.
    assert!(!insights.contains("over the week"));
    assert!(!insights.contains("stable"));

    let recommendations = body["recommendations"].as_str().unwrap();
    assert!(recommendations.contains("• Your mood has been on the lower side."));
    assert!(recommendations.contains("• Your energy has been low."));
}

#[tokio::test]
async fn empty_batch_is_rejected() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated(server.base_url.clone());

    let response = client.summary(json!([])).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "No check-in data provided");
}
