use anyhow::Result;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::{classify_voice, extract_features, Mood, TextAnalysis, TextMoodClassifier};
use crate::audio::AudioFormat;
use crate::models::{EmotionModel, SentimentModel};
use crate::recommend::{games_for, recommendations_for, Game, RecommendationItem};
use crate::report::render_report;
use crate::summary::{generate_summary as build_summary, CheckIn};

use super::error::ApiError;
use super::metrics::{self, metrics_handler};
use super::session::Session;
use super::state::*;
use super::stats::{AnalysisKind, ServiceStats, StatsSnapshot};
use super::{log_requests, ServerConfig};

const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

#[derive(Serialize)]
struct ServiceInfo {
    message: &'static str,
    version: String,
    uptime: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
}

#[derive(Deserialize, Debug)]
struct AnalyzeTextBody {
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
struct TextAnalysisResponse {
    #[serde(flatten)]
    analysis: TextAnalysis,
    user_id: String,
}

#[derive(Serialize)]
struct VoiceAnalysisResponse {
    mood: Mood,
    score: u8,
    energy: u8,
    #[serde(rename = "sentimentScore")]
    sentiment_score: f32,
    emotional_state: String,
    detected_emotions: Vec<String>,
    transcribed_text: String,
    user_id: String,
    game_recommendations: Vec<Game>,
}

#[derive(Deserialize, Debug)]
struct RecommendationsBody {
    mood: Option<String>,
    #[serde(rename = "energyLevel")]
    energy_level: Option<i64>,
    #[serde(rename = "detectedEmotions", default)]
    detected_emotions: Vec<String>,
}

#[derive(Serialize)]
struct RecommendationsResponse {
    recommendations: Vec<RecommendationItem>,
    user_id: String,
}

#[derive(Deserialize, Debug)]
struct CheckInsBody {
    #[serde(rename = "checkIns", default)]
    check_ins: Vec<CheckIn>,
}

#[derive(Serialize)]
struct SummaryResponse {
    insights: String,
    recommendations: String,
    user_id: String,
}

#[derive(Serialize)]
struct StatsResponse {
    #[serde(flatten)]
    snapshot: StatsSnapshot,
    user_id: String,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    Json(ServiceInfo {
        message: "Mood Mirror AI Service is running",
        version: format!("{}-{}", env!("CARGO_PKG_VERSION"), env!("GIT_HASH")),
        uptime: format_uptime(state.start_time.elapsed()),
    })
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

async fn analyze_voice(
    session: Session,
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> Result<Json<VoiceAnalysisResponse>, ApiError> {
    info!("Analyzing voice for user {}", session.user_id);
    let start = Instant::now();

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::Validation("Invalid upload".to_string()))?
    {
        if field.name() == Some("audio") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(|_| ApiError::Validation("Invalid upload".to_string()))?;
            upload = Some((filename, data));
            break;
        }
    }
    let (filename, data) =
        upload.ok_or_else(|| ApiError::Validation("Missing audio file".to_string()))?;

    let format = filename
        .rsplit_once('.')
        .and_then(|(_, ext)| AudioFormat::from_extension(ext))
        .ok_or_else(|| ApiError::Validation("Unsupported file format".to_string()))?;

    let waveform = state.transcoder.decode(data, format).await?;
    info!("Decoded {:.2}s of audio", waveform.duration_secs());

    let transcribed_text = state
        .speech
        .transcribe(&waveform.samples, waveform.sample_rate)
        .await?;
    if transcribed_text.trim().is_empty() {
        return Err(ApiError::Validation(
            "Could not transcribe audio".to_string(),
        ));
    }

    let features = {
        let samples = waveform.samples;
        let sample_rate = waveform.sample_rate;
        tokio::task::spawn_blocking(move || extract_features(&samples, sample_rate))
            .await
            .map_err(|e| anyhow::anyhow!("feature extraction task failed: {e}"))?
    };
    let voice = classify_voice(&features);

    let text = state.text_classifier.classify(&transcribed_text).await?;

    let energy = (text.energy + voice.energy) / 2;
    let game_recommendations = games_for(text.mood.as_str(), energy as i64);

    state
        .stats
        .record_analysis(AnalysisKind::Voice, text.mood, text.score);
    metrics::record_analysis(AnalysisKind::Voice.as_str(), start.elapsed());

    Ok(Json(VoiceAnalysisResponse {
        mood: text.mood,
        score: text.score,
        energy,
        sentiment_score: text.sentiment_score,
        emotional_state: text.emotional_state,
        detected_emotions: text.detected_emotions,
        transcribed_text,
        user_id: session.user_id,
        game_recommendations,
    }))
}

async fn analyze_text(
    session: Session,
    State(state): State<ServerState>,
    Json(body): Json<AnalyzeTextBody>,
) -> Result<Json<TextAnalysisResponse>, ApiError> {
    let start = Instant::now();
    let analysis = state.text_classifier.classify(&body.text).await?;

    state
        .stats
        .record_analysis(AnalysisKind::Text, analysis.mood, analysis.score);
    metrics::record_analysis(AnalysisKind::Text.as_str(), start.elapsed());

    Ok(Json(TextAnalysisResponse {
        analysis,
        user_id: session.user_id,
    }))
}

async fn generate_recommendations(
    session: Session,
    Json(body): Json<RecommendationsBody>,
) -> Result<Json<RecommendationsResponse>, ApiError> {
    let mood = body.mood.filter(|m| !m.is_empty());
    let energy_level = body.energy_level.filter(|e| *e != 0);
    let (mood, energy_level) = match (mood, energy_level) {
        (Some(mood), Some(energy_level)) => (mood, energy_level),
        _ => return Err(ApiError::Validation("Missing required fields".to_string())),
    };

    let recommendations = recommendations_for(&mood, energy_level, &body.detected_emotions);
    Ok(Json(RecommendationsResponse {
        recommendations,
        user_id: session.user_id,
    }))
}

async fn generate_summary(
    session: Session,
    Json(body): Json<CheckInsBody>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let summary = build_summary(&body.check_ins)?;
    Ok(Json(SummaryResponse {
        insights: summary.insights,
        recommendations: summary.recommendations,
        user_id: session.user_id,
    }))
}

async fn generate_report(
    session: Session,
    Json(body): Json<CheckInsBody>,
) -> Result<Response, ApiError> {
    let user_id = session.user_id;
    let report = tokio::task::spawn_blocking(move || render_report(&body.check_ins, &user_id))
        .await
        .map_err(|e| anyhow::anyhow!("report task failed: {e}"))??;

    metrics::record_report();

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", report.filename),
        )
        .body(report.bytes.into())
        .map_err(|e| anyhow::anyhow!("failed to build report response: {e}"))?;
    Ok(response)
}

async fn get_stats(session: Session, State(stats): State<GuardedStats>) -> impl IntoResponse {
    Json(StatsResponse {
        snapshot: stats.snapshot(),
        user_id: session.user_id,
    })
}

pub fn make_app(
    config: ServerConfig,
    transcoder: GuardedTranscoder,
    sentiment: Arc<dyn SentimentModel>,
    emotion: Arc<dyn EmotionModel>,
    speech: GuardedSpeechToText,
) -> Router {
    let state = ServerState {
        config,
        start_time: Instant::now(),
        transcoder,
        speech,
        text_classifier: TextMoodClassifier::new(sentiment, emotion),
        stats: Arc::new(ServiceStats::default()),
    };

    let api_routes: Router = Router::new()
        .route("/analysis/voice", post(analyze_voice))
        .route("/analysis/text", post(analyze_text))
        .route("/recommendations", post(generate_recommendations))
        .route("/summary", post(generate_summary))
        .route("/summary/report", post(generate_report))
        .route("/stats", get(get_stats))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state.clone());

    let public_routes: Router = Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .with_state(state.clone());

    public_routes
        .nest("/v1", api_routes)
        .layer(middleware::from_fn_with_state(state, log_requests))
}

pub async fn run_server(
    config: ServerConfig,
    metrics_port: Option<u16>,
    transcoder: GuardedTranscoder,
    sentiment: Arc<dyn SentimentModel>,
    emotion: Arc<dyn EmotionModel>,
    speech: GuardedSpeechToText,
) -> Result<()> {
    let port = config.port;
    let app = make_app(config, transcoder, sentiment, emotion, speech);

    if let Some(metrics_port) = metrics_port {
        let metrics_app = Router::new().route("/metrics", get(metrics_handler));
        let metrics_listener =
            tokio::net::TcpListener::bind(format!("127.0.0.1:{}", metrics_port)).await?;
        info!("Serving metrics on port {}", metrics_port);
        tokio::spawn(async move {
            if let Err(err) = axum::serve(metrics_listener, metrics_app).await {
                tracing::error!("Metrics server failed: {}", err);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    info!("Listening on port {}", port);

    Ok(axum::serve(listener, app).await?)
}
