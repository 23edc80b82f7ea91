use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mood_mirror_server::audio::FfmpegTranscoder;
use mood_mirror_server::config::{AppConfig, CliConfig, FileConfig};
use mood_mirror_server::models::{EmotionModel, InferenceClient, SentimentModel, SpeechToText};
use mood_mirror_server::server::{self, run_server, RequestsLoggingLevel, ServerConfig};

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to a TOML config file. Values in the file override CLI arguments.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 8000)]
    pub port: u16,

    /// The port for the metrics server (Prometheus scraping).
    #[clap(long, default_value_t = 9100)]
    pub metrics_port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// URL of the model-inference service.
    #[clap(long)]
    pub inference_url: Option<String>,

    /// Timeout in seconds for inference requests.
    #[clap(long, default_value_t = 60)]
    pub inference_timeout_sec: u64,

    /// HS256 secret for verifying bearer tokens. Falls back to the
    /// JWT_SECRET environment variable.
    #[clap(long)]
    pub jwt_secret: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    let cli_config = CliConfig {
        port: cli_args.port,
        metrics_port: cli_args.metrics_port,
        logging_level: cli_args.logging_level,
        inference_url: cli_args.inference_url,
        inference_timeout_sec: cli_args.inference_timeout_sec,
        jwt_secret: cli_args.jwt_secret,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    info!("Initializing metrics...");
    server::metrics::init_metrics();

    info!(
        "Connecting to inference service at {}...",
        config.inference_url
    );
    let inference = Arc::new(InferenceClient::new(
        config.inference_url.clone(),
        config.inference_timeout_sec,
    )?);
    if let Err(err) = inference.health_check().await {
        warn!("Inference service not reachable yet: {}", err);
    }

    let sentiment: Arc<dyn SentimentModel> = inference.clone();
    let emotion: Arc<dyn EmotionModel> = inference.clone();
    let speech: Arc<dyn SpeechToText> = inference;

    let transcoder = Arc::new(FfmpegTranscoder);

    let server_config = ServerConfig {
        requests_logging_level: config.logging_level,
        port: config.port,
        jwt_secret: config.jwt_secret,
    };

    info!("Ready to serve at port {}!", config.port);
    info!("Metrics available at port {}!", config.metrics_port);
    run_server(
        server_config,
        Some(config.metrics_port),
        transcoder,
        sentiment,
        emotion,
        speech,
    )
    .await
}
