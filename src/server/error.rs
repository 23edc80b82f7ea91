//! Error taxonomy for the HTTP handlers.
//!
//! Validation problems map to 400, auth problems to 401 and everything else
//! to 500. The 500 detail is logged server side and echoed in the response
//! body like the rest of the API errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use super::session::SessionExtractionError;
use crate::analysis::AnalysisError;
use crate::audio::DecodeError;
use crate::models::ModelError;
use crate::report::ReportError;
use crate::summary::SummaryError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Auth(String),

    #[error(transparent)]
    Processing(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Validation(detail) => (StatusCode::BAD_REQUEST, detail),
            ApiError::Auth(detail) => (StatusCode::UNAUTHORIZED, detail),
            ApiError::Processing(err) => {
                error!("Request processing failed: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{err:#}"))
            }
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::EmptyText => ApiError::Validation(err.to_string()),
            AnalysisError::Model(err) => ApiError::Processing(err.into()),
        }
    }
}

impl From<SessionExtractionError> for ApiError {
    fn from(err: SessionExtractionError) -> Self {
        ApiError::Auth(err.to_string())
    }
}

impl From<SummaryError> for ApiError {
    fn from(err: SummaryError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<DecodeError> for ApiError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::UnsupportedFormat => ApiError::Validation(err.to_string()),
            other => ApiError::Processing(other.into()),
        }
    }
}

impl From<ModelError> for ApiError {
    fn from(err: ModelError) -> Self {
        ApiError::Processing(err.into())
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Summary(err) => err.into(),
            other => ApiError::Processing(other.into()),
        }
    }
}
