use super::error::ApiError;
use super::state::ServerState;

use axum::{extract::FromRequestParts, http::request::Parts};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tracing::debug;

/// An authenticated request. The backend mints HS256 tokens with the user id
/// nested under a `user` claim.
#[derive(Clone, Debug)]
pub struct Session {
    pub user_id: String,
}

pub const HEADER_SESSION_TOKEN_KEY: &str = "Authorization";

#[derive(Deserialize)]
struct Claims {
    user: UserClaim,
}

#[derive(Deserialize)]
struct UserClaim {
    #[serde(default)]
    id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionExtractionError {
    #[error("Authorization header missing")]
    MissingHeader,
    #[error("Invalid token payload")]
    InvalidPayload,
    #[error("Invalid token")]
    InvalidToken,
}

fn extract_session(parts: &Parts, ctx: &ServerState) -> Result<Session, SessionExtractionError> {
    let header = parts
        .headers
        .get(HEADER_SESSION_TOKEN_KEY)
        .and_then(|v| v.to_str().ok())
        .ok_or(SessionExtractionError::MissingHeader)?;

    let token = header.strip_prefix("Bearer ").unwrap_or(header);

    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(ctx.config.jwt_secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|e| {
        debug!("Token validation failed: {}", e);
        SessionExtractionError::InvalidToken
    })?;

    let user_id = decoded.claims.user.id;
    if user_id.is_empty() {
        return Err(SessionExtractionError::InvalidPayload);
    }

    Ok(Session { user_id })
}

impl FromRequestParts<ServerState> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        extract_session(parts, ctx).map_err(ApiError::from)
    }
}
