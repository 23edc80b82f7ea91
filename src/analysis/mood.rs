//! The closed mood vocabulary shared by every analysis output.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the seven mood labels every endpoint speaks in.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Anxious,
    Angry,
    Neutral,
    Tired,
    Energetic,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Anxious => "anxious",
            Mood::Angry => "angry",
            Mood::Neutral => "neutral",
            Mood::Tired => "tired",
            Mood::Energetic => "energetic",
        }
    }

    /// Parses an exact (case-insensitive) mood label, without synonym mapping.
    pub fn parse(label: &str) -> Option<Mood> {
        match label.to_ascii_lowercase().as_str() {
            "happy" => Some(Mood::Happy),
            "sad" => Some(Mood::Sad),
            "anxious" => Some(Mood::Anxious),
            "angry" => Some(Mood::Angry),
            "neutral" => Some(Mood::Neutral),
            "tired" => Some(Mood::Tired),
            "energetic" => Some(Mood::Energetic),
            _ => None,
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalizes an externally supplied mood label to the closed set.
///
/// Known synonyms map to their category; anything else falls back on the
/// caller's energy level: >= 7 reads as energetic, otherwise neutral.
pub fn normalize_mood(label: &str, energy_level: i64) -> Mood {
    if let Some(mood) = Mood::parse(label) {
        return mood;
    }
    match label.to_ascii_lowercase().as_str() {
        "excited" | "joyful" => Mood::Happy,
        "depressed" | "melancholy" => Mood::Sad,
        "stressed" | "worried" | "fearful" => Mood::Anxious,
        "irritated" | "frustrated" => Mood::Angry,
        "fatigued" | "exhausted" => Mood::Tired,
        _ if energy_level >= 7 => Mood::Energetic,
        _ => Mood::Neutral,
    }
}

/// Finer-grained label produced by the voice classifier before collapsing
/// to a [`Mood`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionalState {
    Excited,
    Anxious,
    Calm,
    Sad,
    Tired,
    Relaxed,
    Neutral,
}

impl EmotionalState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionalState::Excited => "excited",
            EmotionalState::Anxious => "anxious",
            EmotionalState::Calm => "calm",
            EmotionalState::Sad => "sad",
            EmotionalState::Tired => "tired",
            EmotionalState::Relaxed => "relaxed",
            EmotionalState::Neutral => "neutral",
        }
    }

    pub fn to_mood(self) -> Mood {
        match self {
            EmotionalState::Excited => Mood::Happy,
            EmotionalState::Anxious => Mood::Anxious,
            EmotionalState::Calm => Mood::Neutral,
            EmotionalState::Sad => Mood::Sad,
            EmotionalState::Tired => Mood::Tired,
            EmotionalState::Relaxed => Mood::Neutral,
            EmotionalState::Neutral => Mood::Neutral,
        }
    }
}

impl fmt::Display for EmotionalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
