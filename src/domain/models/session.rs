#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Utc;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Message;

pub const PREVIEW_MAX_CHARS: usize = 60;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub preview: String,
    pub messages: Vec<Message>,
}

impl Session {
    /// Builds the stored form of a transcript. The preview comes from the
    /// first user message, or `empty_preview` when the user has not said
    /// anything yet or opened with an image on its own.
    pub fn new(
        id: &str,
        timestamp: DateTime<Utc>,
        messages: &[Message],
        empty_preview: &str,
    ) -> Session {
        let preview = messages
            .iter()
            .find(|e| return e.is_user())
            .map(|e| return e.content.as_str())
            .filter(|e| return !e.is_empty())
            .unwrap_or(empty_preview)
            .chars()
            .take(PREVIEW_MAX_CHARS)
            .collect::<String>();

        return Session {
            id: id.to_string(),
            timestamp,
            preview,
            messages: messages.to_vec(),
        };
    }
}

/// Every saved consultation, in save order and unique by id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    sessions: Vec<Session>,
}

impl History {
    pub fn new(sessions: Vec<Session>) -> History {
        let mut history = History::default();
        for session in sessions {
            history = history.upsert(session);
        }

        return history;
    }

    /// Drops any entry sharing the session's id and appends the session.
    pub fn upsert(mut self, session: Session) -> History {
        self.sessions.retain(|e| return e.id != session.id);
        self.sessions.push(session);
        return self;
    }

    pub fn find(&self, id: &str) -> Option<&Session> {
        return self.sessions.iter().find(|e| return e.id == id);
    }

    pub fn sessions(&self) -> &[Session] {
        return &self.sessions;
    }

    pub fn latest_first(&self) -> Vec<&Session> {
        return self.sessions.iter().rev().collect();
    }

    pub fn len(&self) -> usize {
        return self.sessions.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.sessions.is_empty();
    }
}
