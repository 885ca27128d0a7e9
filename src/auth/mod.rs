pub mod cookie;

use async_trait::async_trait;
use axum::http::HeaderMap;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SecurityConfig;
use crate::error::ApiError;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: impl Into<String>, email: Option<String>, expiry_hours: u64) -> Self {
        let now = Utc::now();
        // Out-of-range expiries saturate instead of overflowing
        let exp = i64::try_from(expiry_hours)
            .ok()
            .and_then(Duration::try_hours)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .map(|at| at.timestamp())
            .unwrap_or(i64::MAX);

        Self {
            sub: user_id.into(),
            email,
            exp,
            iat: now.timestamp(),
        }
    }

    /// Claims expiring after the configured `jwt_expiry_hours`
    pub fn from_config(user_id: impl Into<String>, email: Option<String>, security: &SecurityConfig) -> Self {
        Self::new(user_id, email, security.jwt_expiry_hours)
    }
}

/// Authenticated user resolved from a verified token
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("JWT secret not configured")]
    MissingSecret,

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
}

/// Exchanges an opaque credential for a user identity.
///
/// `Ok(None)` means the token was rejected. `Err` is reserved for the verifier
/// itself being unable to decide.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Option<AuthUser>, AuthError>;
}

/// HS256 JWT verifier keyed by a shared secret
#[derive(Clone)]
pub struct JwtTokenVerifier {
    secret: String,
}

impl JwtTokenVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into() }
    }
}

impl std::fmt::Debug for JwtTokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenVerifier").finish_non_exhaustive()
    }
}

#[async_trait]
impl TokenVerifier for JwtTokenVerifier {
    async fn verify(&self, token: &str) -> Result<Option<AuthUser>, AuthError> {
        if self.secret.is_empty() {
            return Err(AuthError::MissingSecret);
        }

        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let validation = Validation::default();

        match decode::<Claims>(token, &decoding_key, &validation) {
            Ok(token_data) if !token_data.claims.sub.is_empty() => {
                Ok(Some(AuthUser::from(token_data.claims)))
            }
            Ok(_) => {
                tracing::debug!("Rejected JWT with empty subject");
                Ok(None)
            }
            Err(e) => {
                tracing::debug!("Rejected JWT: {}", e);
                Ok(None)
            }
        }
    }
}

/// Mint a signed token for the given claims
pub fn issue_token(claims: &Claims, secret: &str) -> Result<String, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::default();

    encode(&header, claims, &encoding_key)
        .map_err(|e| AuthError::TokenGeneration(e.to_string()))
}

/// Resolve the caller from the `auth_token` cookie.
///
/// No cookie is `Unauthenticated`; a rejected token is `InvalidAuth`.
pub async fn authenticate(
    headers: &HeaderMap,
    verifier: &dyn TokenVerifier,
) -> Result<AuthUser, ApiError> {
    let token = cookie::auth_token_from_headers(headers)?
        .ok_or_else(|| ApiError::unauthenticated("Not authenticated"))?;

    verifier
        .verify(&token)
        .await?
        .ok_or_else(|| ApiError::invalid_auth("Invalid authentication"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderValue};

    const SECRET: &str = "test-secret";

    #[tokio::test]
    async fn test_issue_and_verify_round_trip() {
        let claims = Claims::new("u1", Some("u1@example.com".to_string()), 1);
        let token = issue_token(&claims, SECRET).unwrap();

        let user = JwtTokenVerifier::new(SECRET).verify(&token).await.unwrap();

        assert_eq!(
            user,
            Some(AuthUser { id: "u1".to_string(), email: Some("u1@example.com".to_string()) })
        );
    }

    #[test]
    fn test_expiry_follows_security_config() {
        let security = crate::config::AppConfig::from_env().security;
        let claims = Claims::from_config("u1", None, &security);

        assert_eq!(claims.exp - claims.iat, security.jwt_expiry_hours as i64 * 3600);
    }

    #[test]
    fn test_huge_expiry_saturates() {
        let claims = Claims::new("u1", None, u64::MAX);
        assert_eq!(claims.exp, i64::MAX);

        let claims = Claims::new("u1", None, i64::MAX as u64);
        assert_eq!(claims.exp, i64::MAX);
    }

    #[tokio::test]
    async fn test_wrong_secret_is_rejected() {
        let token = issue_token(&Claims::new("u1", None, 1), SECRET).unwrap();

        let user = JwtTokenVerifier::new("another-secret").verify(&token).await.unwrap();

        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() {
        let mut claims = Claims::new("u1", None, 1);
        claims.iat -= 7200;
        claims.exp = claims.iat + 60;
        let token = issue_token(&claims, SECRET).unwrap();

        let user = JwtTokenVerifier::new(SECRET).verify(&token).await.unwrap();

        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_garbage_token_is_rejected() {
        let user = JwtTokenVerifier::new(SECRET).verify("not-a-jwt").await.unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_missing_secret_is_an_error() {
        let result = JwtTokenVerifier::new("").verify("anything").await;
        assert!(matches!(result, Err(AuthError::MissingSecret)));
    }

    #[tokio::test]
    async fn test_authenticate_outcomes() {
        let verifier = JwtTokenVerifier::new(SECRET);
        let mut headers = HeaderMap::new();

        let err = authenticate(&headers, &verifier).await.unwrap_err();
        assert_eq!(err, ApiError::unauthenticated("Not authenticated"));

        headers.insert(header::COOKIE, HeaderValue::from_static("auth_token=bogus"));
        let err = authenticate(&headers, &verifier).await.unwrap_err();
        assert_eq!(err, ApiError::invalid_auth("Invalid authentication"));

        let token = issue_token(&Claims::new("u9", None, 1), SECRET).unwrap();
        let cookie = HeaderValue::from_str(&format!("auth_token={}", token)).unwrap();
        headers.insert(header::COOKIE, cookie);
        let user = authenticate(&headers, &verifier).await.unwrap();
        assert_eq!(user.id, "u9");
    }
}
