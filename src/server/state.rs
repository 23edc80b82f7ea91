use axum::extract::FromRef;

use crate::analysis::TextMoodClassifier;
use crate::audio::AudioTranscoder;
use crate::models::SpeechToText;
use std::sync::Arc;
use std::time::Instant;

use super::stats::ServiceStats;
use super::ServerConfig;

pub type GuardedTranscoder = Arc<dyn AudioTranscoder>;
pub type GuardedSpeechToText = Arc<dyn SpeechToText>;
pub type GuardedStats = Arc<ServiceStats>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub transcoder: GuardedTranscoder,
    pub speech: GuardedSpeechToText,
    pub text_classifier: TextMoodClassifier,
    pub stats: GuardedStats,
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}

impl FromRef<ServerState> for GuardedTranscoder {
    fn from_ref(input: &ServerState) -> Self {
        input.transcoder.clone()
    }
}

impl FromRef<ServerState> for GuardedSpeechToText {
    fn from_ref(input: &ServerState) -> Self {
        input.speech.clone()
    }
}

impl FromRef<ServerState> for TextMoodClassifier {
    fn from_ref(input: &ServerState) -> Self {
        input.text_classifier.clone()
    }
}

impl FromRef<ServerState> for GuardedStats {
    fn from_ref(input: &ServerState) -> Self {
        input.stats.clone()
    }
}
