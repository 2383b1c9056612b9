//! JWT auth collaborator.
//!
//! Token validation runs as middleware before the upload pipeline; the
//! pipeline itself is identity-agnostic. Enforcement is off by default
//! (`AUTH_ENABLED=false`) and switched on per deployment.

use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{extract::Request, extract::State, middleware::Next, response::Response};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use pixvault_core::AppError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// HS256 token issuer and validator.
#[derive(Clone)]
pub struct JwtAuth {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtAuth {
    pub fn new(secret: &str) -> Self {
        JwtAuth {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn generate(&self, user_id: i64, email: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            user_id,
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("failed to sign token: {}", e)))
    }

    pub fn validate(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthorized(format!("invalid token: {}", e)))
    }
}

/// Bearer-token middleware. Only mounted when auth is enabled.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, HttpAppError> {
    let Some(ref auth) = state.auth else {
        return Ok(next.run(request).await);
    };

    let header = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Authorization header is required".to_string()))?;

    let token = header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Unauthorized("invalid authorization format".to_string())
    })?;

    let claims = auth.validate(token)?;
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}
