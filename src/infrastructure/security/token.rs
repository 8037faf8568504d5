// src/infrastructure/security/token.rs
use crate::application::{
    dto::AuthTokenDto,
    error::{ApplicationError, ApplicationResult},
    ports::security::{TokenError, TokenManager},
};
use crate::domain::user::UserId;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// HMAC-signed JWTs carrying the user id as `sub`.
#[derive(Clone)]
pub struct JwtTokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl JwtTokenManager {
    pub fn new(secret: &[u8], algorithm: Algorithm, ttl: Duration) -> ApplicationResult<Self> {
        if !matches!(algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) {
            return Err(ApplicationError::invalid_input(format!(
                "unsupported token algorithm {algorithm:?}"
            )));
        }
        if ttl <= Duration::zero() {
            return Err(ApplicationError::invalid_input("token ttl must be positive"));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            ttl,
        })
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is compared against the caller's clock in `validate`.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation
    }
}

impl TokenManager for JwtTokenManager {
    fn issue(&self, user_id: UserId, now: DateTime<Utc>) -> ApplicationResult<AuthTokenDto> {
        let expires_at = now + self.ttl;
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|err| ApplicationError::storage(format!("failed to sign token: {err}")))?;

        Ok(AuthTokenDto::bearer(token, now, expires_at))
    }

    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<UserId, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation()).map_err(
            |err| match err.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::InvalidSignature
                }
                _ => TokenError::Malformed,
            },
        )?;

        if now.timestamp() >= data.claims.exp {
            return Err(TokenError::Expired);
        }

        data.claims
            .sub
            .parse::<i64>()
            .ok()
            .and_then(|id| UserId::new(id).ok())
            .ok_or(TokenError::Malformed)
    }
}
