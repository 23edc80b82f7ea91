//! Deterministic fakes for the model and decoder collaborators.
//!
//! The fakes key off words in the input so tests can steer the classifiers
//! without a real inference service.

use super::constants::*;
use async_trait::async_trait;
use bytes::Bytes;
use jsonwebtoken::{encode, EncodingKey, Header};
use mood_mirror_server::audio::{AudioFormat, AudioTranscoder, DecodeError, Waveform};
use mood_mirror_server::models::{
    EmotionModel, EmotionPrediction, ModelError, SentimentLabel, SentimentModel,
    SentimentPrediction, SpeechToText,
};

/// Sentiment fake: "fantastic" is strongly positive, "miserable" strongly
/// negative, "average" weakly positive, everything else mildly positive.
pub struct FakeSentimentModel;

#[async_trait]
impl SentimentModel for FakeSentimentModel {
    async fn classify(&self, text: &str) -> Result<SentimentPrediction, ModelError> {
        let (label, score) = if text.contains("fantastic") {
            (SentimentLabel::Positive, 0.9)
        } else if text.contains("miserable") {
            (SentimentLabel::Negative, 0.9)
        } else if text.contains("average") {
            (SentimentLabel::Positive, 0.1)
        } else {
            (SentimentLabel::Positive, 0.5)
        };
        Ok(SentimentPrediction { label, score })
    }
}

/// Emotion fake: "furious" ranks anger first, "dread" ranks fear first.
pub struct FakeEmotionModel;

#[async_trait]
impl EmotionModel for FakeEmotionModel {
    async fn rank(&self, text: &str, top_k: usize) -> Result<Vec<EmotionPrediction>, ModelError> {
        let labels: [&str; 3] = if text.contains("furious") {
            ["anger", "sadness", "fear"]
        } else if text.contains("dread") {
            ["fear", "sadness", "neutral"]
        } else {
            ["joy", "optimism", "surprise"]
        };
        Ok(labels
            .iter()
            .take(top_k)
            .enumerate()
            .map(|(i, &label)| EmotionPrediction {
                label: label.to_string(),
                score: 0.9 - 0.1 * i as f32,
            })
            .collect())
    }
}

/// Speech fake returning a fixed positive transcript.
pub struct FakeSpeechToText;

pub const FAKE_TRANSCRIPT: &str = "I feel fantastic today";

#[async_trait]
impl SpeechToText for FakeSpeechToText {
    async fn transcribe(&self, _samples: &[f32], _sample_rate: u32) -> Result<String, ModelError> {
        Ok(FAKE_TRANSCRIPT.to_string())
    }
}

/// Speech fake that transcribes nothing, for the empty-transcript path.
pub struct SilentSpeechToText;

#[async_trait]
impl SpeechToText for SilentSpeechToText {
    async fn transcribe(&self, _samples: &[f32], _sample_rate: u32) -> Result<String, ModelError> {
        Ok("  ".to_string())
    }
}

/// Decoder fake producing two seconds of silence regardless of input.
pub struct FakeTranscoder;

#[async_trait]
impl AudioTranscoder for FakeTranscoder {
    async fn decode(&self, _data: Bytes, _format: AudioFormat) -> Result<Waveform, DecodeError> {
        Ok(Waveform {
            samples: vec![0.0; 32_000],
            sample_rate: 16_000,
        })
    }
}

/// Mints a valid bearer token for the given user id
pub fn mint_token(user_id: &str) -> String {
    mint_token_with_secret(user_id, TEST_JWT_SECRET)
}

/// Mints a token signed with an arbitrary secret
pub fn mint_token_with_secret(user_id: &str, secret: &str) -> String {
    let exp = chrono::Utc::now().timestamp() + 3600;
    let claims = serde_json::json!({ "user": { "id": user_id }, "exp": exp });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to mint test token")
}
