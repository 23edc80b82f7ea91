//! Threshold rules mapping audio features to an emotional state.

use serde::Serialize;

use super::features::FeatureVector;
use super::mood::{EmotionalState, Mood};

/// Result of classifying a voice recording's acoustic features.
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct VoiceAnalysis {
    pub emotional_state: EmotionalState,
    pub energy: u8,
    pub mood: Mood,
}

/// Classifies a [`FeatureVector`] with the fixed decision tree.
///
/// The rules are evaluated in order; the first match wins.
pub fn classify_voice(features: &FeatureVector) -> VoiceAnalysis {
    let rms = features.rms_mean;
    let zcr = features.zcr_mean;
    let tempo = features.tempo;
    let centroid = features.centroid_mean;

    let emotional_state = if rms > 0.1 && tempo > 120.0 {
        if zcr < 0.1 {
            EmotionalState::Excited
        } else {
            EmotionalState::Anxious
        }
    } else if rms < 0.05 {
        if centroid < 2000.0 {
            EmotionalState::Calm
        } else {
            EmotionalState::Sad
        }
    } else if tempo < 100.0 {
        if rms < 0.08 {
            EmotionalState::Tired
        } else {
            EmotionalState::Relaxed
        }
    } else {
        EmotionalState::Neutral
    };

    VoiceAnalysis {
        emotional_state,
        energy: energy_from_rms(rms),
        mood: emotional_state.to_mood(),
    }
}

/// Scales RMS onto the 1-10 energy range.
pub fn energy_from_rms(rms: f32) -> u8 {
    if !rms.is_finite() {
        return 1;
    }
    (rms * 50.0).round().clamp(1.0, 10.0) as u8
}
