mod file_config;

pub use file_config::FileConfig;

use crate::server::RequestsLoggingLevel;
use anyhow::Result;
use clap::ValueEnum;

pub const DEFAULT_JWT_SECRET: &str = "your-secret-key";

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub inference_url: Option<String>,
    pub inference_timeout_sec: u64,
    pub jwt_secret: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub inference_url: String,
    pub inference_timeout_sec: u64,
    pub jwt_secret: String,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present; the JWT secret falls
    /// back to the JWT_SECRET environment variable before the dev default.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let port = file.port.unwrap_or(cli.port);
        let metrics_port = file.metrics_port.unwrap_or(cli.metrics_port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let inference_url = file
            .inference_url
            .or_else(|| cli.inference_url.clone())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "inference_url must be specified via --inference-url or in config file"
                )
            })?;

        let inference_timeout_sec = file
            .inference_timeout_sec
            .unwrap_or(cli.inference_timeout_sec);

        let jwt_secret = file
            .jwt_secret
            .or_else(|| cli.jwt_secret.clone())
            .or_else(|| std::env::var("JWT_SECRET").ok())
            .unwrap_or_else(|| DEFAULT_JWT_SECRET.to_string());

        Ok(Self {
            port,
            metrics_port,
            logging_level,
            inference_url,
            inference_timeout_sec,
            jwt_secret,
        })
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_cli() -> CliConfig {
        CliConfig {
            port: 8000,
            metrics_port: 9100,
            logging_level: RequestsLoggingLevel::Path,
            inference_url: Some("http://localhost:8500".to_string()),
            inference_timeout_sec: 60,
            jwt_secret: None,
        }
    }

    #[test]
    fn test_parse_logging_level() {
        assert!(matches!(
            parse_logging_level("none"),
            Some(RequestsLoggingLevel::None)
        ));
        assert!(matches!(
            parse_logging_level("path"),
            Some(RequestsLoggingLevel::Path)
        ));
        assert!(matches!(
            parse_logging_level("headers"),
            Some(RequestsLoggingLevel::Headers)
        ));
        assert!(matches!(
            parse_logging_level("body"),
            Some(RequestsLoggingLevel::Body)
        ));
        // Case insensitive
        assert!(matches!(
            parse_logging_level("PATH"),
            Some(RequestsLoggingLevel::Path)
        ));
        // Invalid
        assert!(parse_logging_level("invalid").is_none());
    }

    #[test]
    fn test_resolve_cli_only() {
        let cli = CliConfig {
            jwt_secret: Some("cli-secret".to_string()),
            ..base_cli()
        };

        let config = AppConfig::resolve(&cli, None).unwrap();

        assert_eq!(config.port, 8000);
        assert_eq!(config.metrics_port, 9100);
        assert_eq!(config.logging_level, RequestsLoggingLevel::Path);
        assert_eq!(config.inference_url, "http://localhost:8500");
        assert_eq!(config.inference_timeout_sec, 60);
        assert_eq!(config.jwt_secret, "cli-secret");
    }

    #[test]
    fn test_resolve_toml_overrides_cli() {
        let cli = base_cli();

        let file_config = FileConfig {
            port: Some(4000),
            logging_level: Some("body".to_string()),
            inference_url: Some("http://inference:9000".to_string()),
            jwt_secret: Some("toml-secret".to_string()),
            ..Default::default()
        };

        let config = AppConfig::resolve(&cli, Some(file_config)).unwrap();

        // TOML values should override CLI
        assert_eq!(config.port, 4000);
        assert_eq!(config.logging_level, RequestsLoggingLevel::Body);
        assert_eq!(config.inference_url, "http://inference:9000");
        assert_eq!(config.jwt_secret, "toml-secret");
        // CLI value used when TOML doesn't specify
        assert_eq!(config.metrics_port, 9100);
        assert_eq!(config.inference_timeout_sec, 60);
    }

    #[test]
    fn test_resolve_missing_inference_url_error() {
        let cli = CliConfig {
            inference_url: None,
            ..base_cli()
        };
        let result = AppConfig::resolve(&cli, None);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("inference_url must be specified"));
    }
}
