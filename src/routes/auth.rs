use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};
use thiserror::Error;

use crate::routes::error::ApiError;

/// Errors that can occur while authenticating a request
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Access token required")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Token verification is not configured")]
    NotConfigured,
}

/// Bearer token payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub exp: usize,
}

/// Signing and verification keys for bearer tokens (HS256)
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issue a token for `user_id` valid for `ttl`
    pub fn issue(&self, user_id: &str, ttl: chrono::Duration) -> Result<String, AuthError> {
        let claims = Claims {
            user_id: user_id.to_string(),
            exp: (chrono::Utc::now() + ttl).timestamp().max(0) as usize,
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))?;
        Ok(data.claims)
    }
}

/// The authenticated caller, extracted from `Authorization: Bearer <token>`
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
}

fn authenticate(req: &HttpRequest) -> Result<AuthUser, AuthError> {
    let keys = req
        .app_data::<web::Data<JwtKeys>>()
        .ok_or(AuthError::NotConfigured)?;

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AuthError::MissingToken)?;

    let claims = keys.verify(token.trim())?;
    Ok(AuthUser { user_id: claims.user_id })
}

impl FromRequest for AuthUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map_err(|e| {
            tracing::debug!("Rejected request to {}: {}", req.path(), e);
            ApiError::from(e)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify() {
        let keys = JwtKeys::from_secret("test-secret");
        let token = keys.issue("user-1", chrono::Duration::hours(1)).unwrap();

        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.user_id, "user-1");
    }

    #[test]
    fn test_verify_rejects_other_secret() {
        let token = JwtKeys::from_secret("one").issue("user-1", chrono::Duration::hours(1)).unwrap();
        assert!(matches!(
            JwtKeys::from_secret("two").verify(&token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_verify_rejects_expired() {
        let keys = JwtKeys::from_secret("test-secret");
        let token = keys.issue("user-1", chrono::Duration::hours(-2)).unwrap();
        assert!(keys.verify(&token).is_err());
    }
}
