#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

use std::collections::HashMap;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use chrono::Duration;

use crate::domain::models::AuthError;
use crate::domain::models::AuthMarker;
use crate::domain::models::ClockBox;
use crate::domain::models::IdentityProvider;
use crate::domain::models::IdentityProviderBox;
use crate::domain::models::StorageBox;
use crate::domain::models::StorageKey;

/// Fixed identifier to secret table, configured as `user:secret` pairs
/// separated by commas. Secrets are compared in plain text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CredentialTable {
    entries: HashMap<String, String>,
}

impl CredentialTable {
    pub fn parse(text: &str) -> Result<CredentialTable> {
        let mut entries = HashMap::new();
        for pair in text.split(',').map(|e| return e.trim()) {
            if pair.is_empty() {
                continue;
            }

            match pair.split_once(':') {
                Some((identifier, secret)) if !identifier.trim().is_empty() => {
                    entries.insert(identifier.trim().to_string(), secret.to_string());
                }
                _ => bail!(format!("Credential entry is not user:secret, got {pair}")),
            }
        }

        return Ok(CredentialTable { entries });
    }

    pub fn len(&self) -> usize {
        return self.entries.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.entries.is_empty();
    }
}

#[async_trait]
impl IdentityProvider for CredentialTable {
    #[allow(clippy::implicit_return)]
    async fn verify(&self, identifier: &str, secret: &str) -> Result<bool> {
        return Ok(self
            .entries
            .get(identifier)
            .map(|e| return e == secret)
            .unwrap_or(false));
    }
}

/// Login gate for the whole app. Demo grade: no hashing, no rate
/// limiting, no lockout.
pub struct AuthGate {
    storage: StorageBox,
    clock: ClockBox,
    provider: IdentityProviderBox,
    ttl: Duration,
}

impl AuthGate {
    pub fn new(
        storage: StorageBox,
        clock: ClockBox,
        provider: IdentityProviderBox,
        ttl: Duration,
    ) -> AuthGate {
        return AuthGate {
            storage,
            clock,
            provider,
            ttl,
        };
    }

    pub async fn login(&self, identifier: &str, secret: &str) -> Result<AuthMarker, AuthError> {
        let accepted = self
            .provider
            .verify(identifier, secret)
            .await
            .map_err(|err| return AuthError::Provider(err.to_string()))?;

        if !accepted {
            tracing::warn!(identifier, "Rejected login");
            return Err(AuthError::InvalidCredentials);
        }

        let marker = AuthMarker {
            identifier: identifier.to_string(),
            timestamp: self.clock.now().timestamp_millis(),
        };
        let payload = serde_json::to_string(&marker)
            .map_err(|err| return AuthError::Storage(err.to_string()))?;
        self.storage
            .set(StorageKey::Auth, &payload)
            .await
            .map_err(|err| return AuthError::Storage(err.to_string()))?;

        tracing::debug!(identifier, "Logged in");
        return Ok(marker);
    }

    /// Returns the stored login while it is younger than the ttl. Expired
    /// or unreadable markers are removed.
    pub async fn restore(&self) -> Option<AuthMarker> {
        let payload = match self.storage.get(StorageKey::Auth).await {
            Ok(Some(payload)) => payload,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!(err = ?err, "Failed to read login marker");
                return None;
            }
        };

        let marker = match serde_json::from_str::<AuthMarker>(&payload) {
            Ok(marker) => marker,
            Err(err) => {
                tracing::warn!(err = ?err, "Login marker is malformed");
                self.clear().await;
                return None;
            }
        };

        let elapsed = self.clock.now().timestamp_millis() - marker.timestamp;
        if elapsed >= self.ttl.num_milliseconds() {
            tracing::debug!(identifier = marker.identifier, "Login marker expired");
            self.clear().await;
            return None;
        }

        return Some(marker);
    }

    pub async fn logout(&self) {
        self.clear().await;
    }

    async fn clear(&self) {
        if let Err(err) = self.storage.remove(StorageKey::Auth).await {
            tracing::warn!(err = ?err, "Failed to remove login marker");
        }
    }
}
