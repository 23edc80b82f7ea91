//! Audio decoding.
//!
//! Uploaded recordings are piped through an ffmpeg child process and come out
//! as f32 mono 16kHz PCM, which is what both the feature extractor and the
//! speech-to-text model consume.

use async_trait::async_trait;
use bytes::Bytes;
use ffmpeg_sidecar::{download, paths::ffmpeg_path};

/// Target sample rate for all decoded audio.
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// Container formats accepted for upload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioFormat {
    Webm,
    Wav,
    Mp3,
}

impl AudioFormat {
    /// Maps a file extension (without the dot, any case) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "webm" => Some(Self::Webm),
            "wav" => Some(Self::Wav),
            "mp3" => Some(Self::Mp3),
            _ => None,
        }
    }

    /// The ffmpeg demuxer name for this format.
    fn demuxer(self) -> &'static str {
        match self {
            Self::Webm => "matroska",
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
        }
    }
}

/// Decoded audio, always f32 mono at [`TARGET_SAMPLE_RATE`].
#[derive(Clone, Debug, PartialEq)]
pub struct Waveform {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl Waveform {
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Unsupported file format")]
    UnsupportedFormat,

    #[error("ffmpeg unavailable: {0}")]
    FfmpegUnavailable(String),

    #[error("ffmpeg failed: {0}")]
    FfmpegFailed(String),

    #[error("invalid pcm output: {0}")]
    InvalidPcm(String),
}

/// Turns an uploaded container into a normalized [`Waveform`].
#[async_trait]
pub trait AudioTranscoder: Send + Sync {
    async fn decode(&self, data: Bytes, format: AudioFormat) -> Result<Waveform, DecodeError>;
}

/// [`AudioTranscoder`] backed by an ffmpeg child process per request.
#[derive(Clone, Debug, Default)]
pub struct FfmpegTranscoder;

impl FfmpegTranscoder {
    fn ensure_ffmpeg_available(&self) -> Result<(), DecodeError> {
        download::auto_download().map_err(|e| DecodeError::FfmpegUnavailable(e.to_string()))
    }

    fn parse_f32le(raw: &[u8]) -> Result<Vec<f32>, DecodeError> {
        if raw.len() % 4 != 0 {
            return Err(DecodeError::InvalidPcm(format!(
                "f32le byte length must be multiple of 4, got {}",
                raw.len()
            )));
        }
        let mut out = Vec::with_capacity(raw.len() / 4);
        for chunk in raw.chunks_exact(4) {
            out.push(f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
        }
        Ok(out)
    }

    async fn decode_with_ffmpeg(
        &self,
        data: Bytes,
        format: AudioFormat,
    ) -> Result<Vec<f32>, DecodeError> {
        let mut child = tokio::process::Command::new(ffmpeg_path())
            .args([
                "-hide_banner",
                "-nostdin",
                "-loglevel",
                "error",
                "-f",
                format.demuxer(),
                "-i",
                "pipe:0",
                "-vn",
                "-sn",
                "-dn",
                "-ac",
                "1",
                "-ar",
                "16000",
                "-f",
                "f32le",
                "-acodec",
                "pcm_f32le",
                "pipe:1",
            ])
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .spawn()
            .map_err(|e| DecodeError::FfmpegFailed(e.to_string()))?;

        let mut stdin = child.stdin.take().ok_or_else(|| {
            DecodeError::FfmpegFailed("ffmpeg stdin unavailable (pipe not created)".to_owned())
        })?;
        let mut stdout = child.stdout.take().ok_or_else(|| {
            DecodeError::FfmpegFailed("ffmpeg stdout unavailable (pipe not created)".to_owned())
        })?;
        let mut stderr = child.stderr.take().ok_or_else(|| {
            DecodeError::FfmpegFailed("ffmpeg stderr unavailable (pipe not created)".to_owned())
        })?;

        let stdin_task = tokio::spawn(async move {
            use tokio::io::AsyncWriteExt;
            stdin.write_all(&data).await?;
            stdin.shutdown().await?;
            Ok::<(), std::io::Error>(())
        });

        let stdout_task = tokio::spawn(async move {
            use tokio::io::AsyncReadExt;
            let mut buf = Vec::new();
            stdout.read_to_end(&mut buf).await?;
            Ok::<Vec<u8>, std::io::Error>(buf)
        });

        let stderr_task = tokio::spawn(async move {
            use tokio::io::AsyncReadExt;
            let mut buf = Vec::new();
            stderr.read_to_end(&mut buf).await?;
            Ok::<Vec<u8>, std::io::Error>(buf)
        });

        let status = child
            .wait()
            .await
            .map_err(|e| DecodeError::FfmpegFailed(e.to_string()))?;

        stdin_task
            .await
            .map_err(|e| DecodeError::FfmpegFailed(e.to_string()))?
            .map_err(|e| DecodeError::FfmpegFailed(e.to_string()))?;

        let stdout_bytes = stdout_task
            .await
            .map_err(|e| DecodeError::FfmpegFailed(e.to_string()))?
            .map_err(|e| DecodeError::FfmpegFailed(e.to_string()))?;

        let stderr_bytes = stderr_task
            .await
            .map_err(|e| DecodeError::FfmpegFailed(e.to_string()))?
            .map_err(|e| DecodeError::FfmpegFailed(e.to_string()))?;

        if !status.success() {
            let stderr_s = String::from_utf8_lossy(&stderr_bytes).trim().to_owned();
            return Err(DecodeError::FfmpegFailed(format!(
                "exit_code={:?} stderr={stderr_s}",
                status.code()
            )));
        }

        Self::parse_f32le(&stdout_bytes)
    }
}

#[async_trait]
impl AudioTranscoder for FfmpegTranscoder {
    async fn decode(&self, data: Bytes, format: AudioFormat) -> Result<Waveform, DecodeError> {
        self.ensure_ffmpeg_available()?;
        let samples = self.decode_with_ffmpeg(data, format).await?;
        Ok(Waveform {
            samples,
            sample_rate: TARGET_SAMPLE_RATE,
        })
    }
}
