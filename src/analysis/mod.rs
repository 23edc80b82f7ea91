pub mod features;
pub mod mood;
pub mod text;
pub mod voice;

pub use features::{extract_features, FeatureVector};
pub use mood::{normalize_mood, EmotionalState, Mood};
pub use text::{AnalysisError, TextAnalysis, TextMoodClassifier};
pub use voice::{classify_voice, VoiceAnalysis};
