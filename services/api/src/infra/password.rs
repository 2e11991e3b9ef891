use anyhow::Context as _;

use crate::domain::repository::PasswordHasher;
use crate::error::ApiError;

/// bcrypt hashing on the blocking pool.
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::with_cost(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    async fn hash(&self, plain: &str) -> Result<String, ApiError> {
        let plain = plain.to_owned();
        let cost = self.cost;
        let hash = tokio::task::spawn_blocking(move || bcrypt::hash(plain, cost))
            .await
            .context("join bcrypt hash task")?
            .context("bcrypt hash")?;
        Ok(hash)
    }

    async fn verify(&self, plain: &str, hash: &str) -> Result<bool, ApiError> {
        let plain = plain.to_owned();
        let hash = hash.to_owned();
        let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(plain, &hash))
            .await
            .context("join bcrypt verify task")?;
        // A corrupt stored hash is a failed login, not a server error.
        Ok(outcome.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "stored password hash is unreadable");
            false
        }))
    }
}
