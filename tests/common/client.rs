//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with helpers for every endpoint. When API routes or
//! request formats change, update only this file.

use super::constants::*;
use super::fixtures::mint_token;
use reqwest::multipart::{Form, Part};
use reqwest::Response;
use serde_json::{json, Value};
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
    /// Bearer token attached to requests, if any
    pub token: Option<String>,
}

impl TestClient {
    /// Creates a client that sends no Authorization header
    pub fn unauthenticated(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self {
            client,
            base_url,
            token: None,
        }
    }

    /// Creates a client with a freshly minted token for the default test user
    pub fn authenticated(base_url: String) -> Self {
        Self::with_token(base_url, mint_token(TEST_USER_ID))
    }

    /// Creates a client using an explicit token
    pub fn with_token(base_url: String, token: String) -> Self {
        let mut client = Self::unauthenticated(base_url);
        client.token = Some(token);
        client
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.with_auth(self.client.get(format!("{}{}", self.base_url, path)))
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.with_auth(self.client.post(format!("{}{}", self.base_url, path)))
    }

    fn with_auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", format!("Bearer {token}")),
            None => builder,
        }
    }

    /// GET /
    pub async fn home(&self) -> Response {
        self.get("/").send().await.expect("Home request failed")
    }

    /// GET /health
    pub async fn health(&self) -> Response {
        self.get("/health")
            .send()
            .await
            .expect("Health request failed")
    }

    /// POST /v1/analysis/text
    pub async fn analyze_text(&self, text: &str) -> Response {
        self.post("/v1/analysis/text")
            .json(&json!({ "text": text }))
            .send()
            .await
            .expect("Text analysis request failed")
    }

    /// POST /v1/analysis/voice with a multipart "audio" field
    pub async fn analyze_voice(&self, filename: &str, data: Vec<u8>) -> Response {
        let part = Part::bytes(data).file_name(filename.to_string());
        let form = Form::new().part("audio", part);
        self.post("/v1/analysis/voice")
            .multipart(form)
            .send()
            .await
            .expect("Voice analysis request failed")
    }

    /// POST /v1/recommendations
    pub async fn recommendations(&self, body: Value) -> Response {
        self.post("/v1/recommendations")
            .json(&body)
            .send()
            .await
            .expect("Recommendations request failed")
    }

    /// POST /v1/summary
    pub async fn summary(&self, check_ins: Value) -> Response {
        self.post("/v1/summary")
            .json(&json!({ "checkIns": check_ins }))
            .send()
            .await
            .expect("Summary request failed")
    }

    /// POST /v1/summary/report
    pub async fn report(&self, check_ins: Value) -> Response {
        self.post("/v1/summary/report")
            .json(&json!({ "checkIns": check_ins }))
            .send()
            .await
            .expect("Report request failed")
    }

    /// GET /v1/stats
    pub async fn stats(&self) -> Response {
        self.get("/v1/stats")
            .send()
            .await
            .expect("Stats request failed")
    }
}
