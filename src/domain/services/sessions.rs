#[cfg(test)]
#[path = "sessions_test.rs"]
mod tests;

use crate::domain::models::History;
use crate::domain::models::Session;
use crate::domain::models::StorageBox;
use crate::domain::models::StorageKey;

/// Persists the whole session history as one JSON blob. Reads and writes
/// never fail towards the caller: a missing or corrupt blob is an empty
/// history, and a failed write keeps the in-memory result.
pub struct SessionStore {
    storage: StorageBox,
}

impl SessionStore {
    pub fn new(storage: StorageBox) -> SessionStore {
        return SessionStore { storage };
    }

    pub async fn load(&self) -> History {
        let payload = match self.storage.get(StorageKey::History).await {
            Ok(Some(payload)) => payload,
            Ok(None) => return History::default(),
            Err(err) => {
                tracing::warn!(err = ?err, "Failed to read session history");
                return History::default();
            }
        };

        match serde_json::from_str::<Vec<Session>>(&payload) {
            Ok(sessions) => return History::new(sessions),
            Err(err) => {
                tracing::warn!(err = ?err, "Stored session history is malformed, starting empty");
                return History::default();
            }
        }
    }

    /// Upserts `session` into `history` and rewrites the stored list.
    pub async fn save(&self, session: Session, history: History) -> History {
        let id = session.id.to_string();
        let history = history.upsert(session);

        let payload = match serde_json::to_string(&history) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::error!(err = ?err, id, "Failed to serialize session history");
                return history;
            }
        };

        if let Err(err) = self.storage.set(StorageKey::History, &payload).await {
            tracing::error!(err = ?err, id, "Failed to write session history");
        } else {
            tracing::debug!(id, sessions = history.len(), "Saved session");
        }

        return history;
    }
}
