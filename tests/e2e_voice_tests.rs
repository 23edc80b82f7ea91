//! End-to-end voice analysis tests
//!
//! The decoder and speech fakes short-circuit ffmpeg and the inference
//! service, so the tests exercise routing, validation and the combined
//! text-plus-voice scoring.

mod common;

use common::client::TestClient;
use common::constants::TEST_USER_ID;
use common::fixtures::{SilentSpeechToText, FAKE_TRANSCRIPT};
use common::server::TestServer;
use reqwest::StatusCode;
use std::sync::Arc;

#[tokio::test]
async fn voice_upload_is_analyzed() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated(server.base_url.clone());

    let response = client
        .analyze_voice("sample.webm", vec![0u8; 1024])
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["transcribed_text"], FAKE_TRANSCRIPT);
    assert_eq!(body["mood"], "happy");
    assert_eq!(body["score"], 10);
    // Text energy 7, silent waveform energy 1, averaged down to 4.
    assert_eq!(body["energy"], 4);
    assert_eq!(body["user_id"], TEST_USER_ID);

    let game_ids: Vec<&str> = body["game_recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["id"].as_str().unwrap())
        .collect();
    assert_eq!(game_ids, vec!["memory", "color-relax"]);
}

#[tokio::test]
async fn unsupported_extension_is_rejected() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated(server.base_url.clone());

    let response = client.analyze_voice("sample.ogg", vec![0u8; 16]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "Unsupported file format");
}

#[tokio::test]
async fn empty_transcript_is_rejected() {
    let server = TestServer::spawn_with_speech(Arc::new(SilentSpeechToText)).await;
    let client = TestClient::authenticated(server.base_url.clone());

    let response = client.analyze_voice("sample.wav", vec![0u8; 16]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "Could not transcribe audio");
}

#[tokio::test]
async fn missing_audio_field_is_rejected() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated(server.base_url.clone());

    let form = reqwest::multipart::Form::new().text("note", "no audio here");
    let response = client
        .client
        .post(format!("{}/v1/analysis/voice", server.base_url))
        .header(
            "Authorization",
            format!("Bearer {}", client.token.clone().unwrap()),
        )
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "Missing audio file");
}
