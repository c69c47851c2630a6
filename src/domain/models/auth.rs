use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use thiserror::Error;

/// Proof of a successful login, kept in storage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthMarker {
    pub identifier: String,
    /// Epoch milliseconds of the login.
    pub timestamp: i64,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Identity provider failed: {0}")]
    Provider(String),
    #[error("Failed to store the login: {0}")]
    Storage(String),
}

/// Decides whether an identifier and secret pair is valid.
#[async_trait]
pub trait IdentityProvider {
    async fn verify(&self, identifier: &str, secret: &str) -> Result<bool>;
}

pub type IdentityProviderBox = Arc<dyn IdentityProvider + Send + Sync>;
