//! Text mood classification.
//!
//! Combines a binary sentiment model and a multi-label emotion model into a
//! mood label, a 0-10 score and a 1-10 energy estimate via fixed rules.

use serde::Serialize;
use std::sync::Arc;

use super::mood::Mood;
use crate::models::{EmotionModel, ModelError, SentimentLabel, SentimentModel};

/// How many emotion labels the classifier considers.
const EMOTION_TOP_K: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Text is required")]
    EmptyText,

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result of classifying a text snippet.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct TextAnalysis {
    pub mood: Mood,
    pub score: u8,
    pub energy: u8,
    #[serde(rename = "sentimentScore")]
    pub sentiment_score: f32,
    /// The strongest detected emotion, or "neutral" when none were detected.
    pub emotional_state: String,
    pub detected_emotions: Vec<String>,
}

/// Classifier holding shared read-only references to the two text models.
#[derive(Clone)]
pub struct TextMoodClassifier {
    sentiment: Arc<dyn SentimentModel>,
    emotion: Arc<dyn EmotionModel>,
}

impl TextMoodClassifier {
    pub fn new(sentiment: Arc<dyn SentimentModel>, emotion: Arc<dyn EmotionModel>) -> Self {
        Self { sentiment, emotion }
    }

    pub async fn classify(&self, text: &str) -> Result<TextAnalysis, AnalysisError> {
        if text.trim().is_empty() {
            return Err(AnalysisError::EmptyText);
        }

        let prediction = self.sentiment.classify(text).await?;
        let sentiment_score = match prediction.label {
            SentimentLabel::Positive => prediction.score,
            SentimentLabel::Negative => -prediction.score,
        };

        let detected_emotions: Vec<String> = self
            .emotion
            .rank(text, EMOTION_TOP_K)
            .await?
            .into_iter()
            .map(|p| p.label)
            .collect();

        let base_mood = mood_from_sentiment(sentiment_score);
        let mood = apply_emotion_overrides(base_mood, &detected_emotions);

        let emotional_state = detected_emotions
            .first()
            .cloned()
            .unwrap_or_else(|| "neutral".to_string());

        Ok(TextAnalysis {
            mood,
            score: mood_score(sentiment_score),
            energy: energy_from_emotions(&detected_emotions),
            sentiment_score,
            emotional_state,
            detected_emotions,
        })
    }
}

/// Maps the signed sentiment score onto the 0-10 mood score.
pub fn mood_score(sentiment_score: f32) -> u8 {
    ((sentiment_score + 1.0) * 5.0).round().clamp(0.0, 10.0) as u8
}

/// Sentiment thresholds for the base mood. The two middle branches both
/// yield neutral, matching the shipped rule table.
pub fn mood_from_sentiment(sentiment_score: f32) -> Mood {
    if sentiment_score > 0.6 {
        Mood::Happy
    } else if sentiment_score > 0.2 {
        Mood::Neutral
    } else if sentiment_score > -0.2 {
        Mood::Neutral
    } else if sentiment_score > -0.6 {
        Mood::Sad
    } else {
        Mood::Sad
    }
}

/// Anger and fear take priority over the sentiment-derived mood, anger first.
pub fn apply_emotion_overrides(base: Mood, detected_emotions: &[String]) -> Mood {
    if detected_emotions.iter().any(|e| e == "anger") {
        Mood::Angry
    } else if detected_emotions.iter().any(|e| e == "fear") {
        Mood::Anxious
    } else {
        base
    }
}

/// Mean of the per-emotion energy table, rounded down; 5 when nothing was
/// detected or for unknown labels.
pub fn energy_from_emotions(detected_emotions: &[String]) -> u8 {
    if detected_emotions.is_empty() {
        return 5;
    }
    let total: u32 = detected_emotions
        .iter()
        .map(|emotion| match emotion.as_str() {
            "joy" => 8u32,
            "optimism" => 7,
            "neutral" => 5,
            "sadness" => 3,
            "anger" => 6,
            "fear" => 4,
            "surprise" => 7,
            _ => 5,
        })
        .sum();
    (total / detected_emotions.len() as u32) as u8
}
