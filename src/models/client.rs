//! HTTP client for the external model-inference service.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use super::{
    EmotionModel, EmotionPrediction, ModelError, SentimentModel, SentimentPrediction, SpeechToText,
};

/// Client for a model-inference sidecar exposing the sentiment, emotion and
/// speech-to-text models over HTTP. One instance backs all three model
/// traits; it holds no state beyond the connection pool.
pub struct InferenceClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

impl InferenceClient {
    /// Create a new inference client.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the inference service (e.g., "http://localhost:8500")
    /// * `timeout_sec` - Request timeout in seconds; model calls can be slow,
    ///   so this is the only cancellation point for them.
    pub fn new(base_url: String, timeout_sec: u64) -> Result<Self, ModelError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_sec))
            .build()
            .map_err(|e| ModelError::Request(e.to_string()))?;

        let base_url = base_url.trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    /// Check if the inference service is healthy.
    pub async fn health_check(&self) -> Result<(), ModelError> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ModelError::Request(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ModelError::Status {
                status: response.status().as_u16(),
                detail: "inference health check failed".to_string(),
            })
        }
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<T, ModelError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ModelError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ModelError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ModelError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl SentimentModel for InferenceClient {
    async fn classify(&self, text: &str) -> Result<SentimentPrediction, ModelError> {
        self.post_json("/v1/sentiment", serde_json::json!({ "text": text }))
            .await
    }
}

#[async_trait]
impl EmotionModel for InferenceClient {
    async fn rank(&self, text: &str, top_k: usize) -> Result<Vec<EmotionPrediction>, ModelError> {
        self.post_json(
            "/v1/emotions",
            serde_json::json!({ "text": text, "top_k": top_k }),
        )
        .await
    }
}

#[async_trait]
impl SpeechToText for InferenceClient {
    async fn transcribe(&self, samples: &[f32], sample_rate: u32) -> Result<String, ModelError> {
        let mut raw = Vec::with_capacity(samples.len() * 4);
        for sample in samples {
            raw.extend_from_slice(&sample.to_le_bytes());
        }

        let url = format!("{}/v1/transcribe", self.base_url);
        let response = self
            .client
            .post(&url)
            .query(&[("sample_rate", sample_rate)])
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(raw)
            .send()
            .await
            .map_err(|e| ModelError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ModelError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        let body: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| ModelError::InvalidResponse(e.to_string()))?;
        Ok(body.text)
    }
}
