//! Pretrained-model collaborators.
//!
//! The classifiers treat the sentiment, emotion and speech models as opaque
//! functions behind these traits. The process holds one read-only instance
//! of each, created at startup and shared across requests.

mod client;

pub use client::InferenceClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("inference request failed: {0}")]
    Request(String),

    #[error("inference service returned status {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("invalid inference response: {0}")]
    InvalidResponse(String),
}

/// Binary sentiment label as emitted by the sentiment model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SentimentPrediction {
    pub label: SentimentLabel,
    /// Model confidence in [0, 1].
    pub score: f32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EmotionPrediction {
    pub label: String,
    pub score: f32,
}

#[async_trait]
pub trait SentimentModel: Send + Sync {
    async fn classify(&self, text: &str) -> Result<SentimentPrediction, ModelError>;
}

#[async_trait]
pub trait EmotionModel: Send + Sync {
    /// Returns up to `top_k` emotion labels in descending confidence order.
    async fn rank(&self, text: &str, top_k: usize) -> Result<Vec<EmotionPrediction>, ModelError>;
}

#[async_trait]
pub trait SpeechToText: Send + Sync {
    async fn transcribe(&self, samples: &[f32], sample_rate: u32) -> Result<String, ModelError>;
}
