// src/application/ports/security.rs
use crate::application::{ApplicationResult, dto::AuthTokenDto, error::ApplicationError};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> ApplicationResult<String>;

    /// `false` on mismatch and on a hash that cannot be parsed.
    async fn verify(&self, password: &str, expected_hash: &str) -> bool;
}

/// Reasons a bearer token is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
}

impl From<TokenError> for ApplicationError {
    fn from(err: TokenError) -> Self {
        ApplicationError::Unauthorized(err.to_string())
    }
}

pub trait TokenManager: Send + Sync {
    fn issue(&self, user_id: UserId, now: DateTime<Utc>) -> ApplicationResult<AuthTokenDto>;

    /// Valid only while `now` is strictly before the embedded expiry.
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<UserId, TokenError>;
}
