// src/application/dto/auth.rs
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

pub const BEARER_TOKEN_TYPE: &str = "bearer";

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthTokenDto {
    pub access_token: String,
    /// Always `"bearer"`.
    pub token_type: String,
    pub expires_in: i64,
    #[serde(with = "serde_time")]
    pub expires_at: DateTime<Utc>,
}

impl AuthTokenDto {
    pub fn bearer(access_token: String, issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        let expires_in = expires_at
            .signed_duration_since(issued_at)
            .num_seconds()
            .max(0);
        Self {
            access_token,
            token_type: BEARER_TOKEN_TYPE.to_string(),
            expires_in,
            expires_at,
        }
    }
}

/// Identity resolved from a valid bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: UserId,
}
