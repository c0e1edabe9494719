//! JWT token service
//!
//! Validates bearer tokens minted by the identity service and extracts
//! the authenticated principal. Token issuance lives here too so local
//! development and tests can mint their own tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Signing secret (shared with the identity service)
    pub secret: String,
    /// Token lifetime in minutes
    pub expiration_minutes: i64,
    /// Expected issuer
    pub issuer: String,
    /// Expected audience
    pub audience: String,
}

impl JwtConfig {
    /// Load from environment variables
    ///
    /// | Variable                 | Default             |
    /// |--------------------------|---------------------|
    /// | `JWT_SECRET`             | `wercha-dev-secret` |
    /// | `JWT_EXPIRATION_MINUTES` | `1440`              |
    /// | `JWT_ISSUER`             | `wercha-api`        |
    /// | `JWT_AUDIENCE`           | `wercha-client`     |
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, using development secret");
            "wercha-dev-secret".to_string()
        });

        Self {
            secret,
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1440),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "wercha-api".to_string()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "wercha-client".to_string()),
        }
    }
}

/// Claims stored in the token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id (subject)
    pub sub: String,
    /// Expiry timestamp (seconds)
    pub exp: i64,
    /// Issued-at timestamp (seconds)
    pub iat: i64,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
}

/// JWT errors
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),
}

/// JWT token service
#[derive(Debug, Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Mint a token for a user
    pub fn generate_token(&self, user_id: &str) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Validate and decode a token
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::InvalidToken => JwtError::InvalidToken(e.to_string()),
                _ => JwtError::InvalidToken(format!("Token validation failed: {e}")),
            }
        })?;

        Ok(token_data.claims)
    }

    /// Extract the token from an Authorization header value
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

/// Authenticated principal, parsed from JWT claims
///
/// Created by the auth middleware and injected into request extensions.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// User id
    pub id: String,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self { id: claims.sub }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "unit-test-secret-key".to_string(),
            expiration_minutes: 60,
            issuer: "wercha-api".to_string(),
            audience: "wercha-client".to_string(),
        }
    }

    #[test]
    fn test_token_round_trip() {
        let service = JwtService::with_config(test_config());

        let token = service
            .generate_token("user123")
            .expect("Failed to generate test token");
        let claims = service
            .validate_token(&token)
            .expect("Failed to validate test token");

        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.iss, "wercha-api");
        assert_eq!(claims.aud, "wercha-client");
        assert_eq!(CurrentUser::from(claims).id, "user123");
    }

    #[test]
    fn test_expired_token_rejected() {
        // Negative lifetime mints a token that expired beyond the
        // default 60s validation leeway
        let mut config = test_config();
        config.expiration_minutes = -5;
        let service = JwtService::with_config(config);

        let token = service
            .generate_token("user123")
            .expect("Failed to generate test token");

        assert!(matches!(
            service.validate_token(&token),
            Err(JwtError::ExpiredToken)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service = JwtService::with_config(test_config());
        let mut other_config = test_config();
        other_config.secret = "a-different-secret-key".to_string();
        let other = JwtService::with_config(other_config);

        let token = service
            .generate_token("user123")
            .expect("Failed to generate test token");

        assert!(matches!(
            other.validate_token(&token),
            Err(JwtError::InvalidSignature)
        ));
    }

    #[test]
    fn test_wrong_audience_rejected() {
        let service = JwtService::with_config(test_config());
        let mut other_config = test_config();
        other_config.audience = "someone-else".to_string();
        let other = JwtService::with_config(other_config);

        let token = service
            .generate_token("user123")
            .expect("Failed to generate test token");

        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_extract_from_header() {
        assert_eq!(
            JwtService::extract_from_header("Bearer abc.def.ghi"),
            Some("abc.def.ghi")
        );
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
    }
}
