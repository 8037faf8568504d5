// tests/support/mocks/security.rs
use async_trait::async_trait;
use folio_core::application::{ApplicationResult, ports::security::PasswordHasher};

const PREFIX: &str = "plain$";

/// Reversible stand-in for Argon2 so service tests stay fast.
pub struct PlainPasswordHasher;

#[async_trait]
impl PasswordHasher for PlainPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(format!("{PREFIX}{password}"))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> bool {
        expected_hash
            .strip_prefix(PREFIX)
            .is_some_and(|stored| stored == password)
    }
}
