#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

use super::ImageData;
use super::Message;
use super::Role;

#[derive(Clone, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum BackendName {
    Gemini,
    Mock,
}

impl BackendName {
    pub fn parse(text: String) -> Option<BackendName> {
        return BackendName::iter().find(|e| return e.to_string() == text);
    }
}

/// One entry of the conversation as sent to a backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
    pub image: Option<ImageData>,
}

impl ChatTurn {
    pub fn from_transcript(messages: &[Message]) -> Vec<ChatTurn> {
        return messages
            .iter()
            .map(|msg| {
                return ChatTurn {
                    role: msg.role,
                    content: msg.content.to_string(),
                    image: msg.image_data(),
                };
            })
            .collect();
    }
}

#[async_trait]
pub trait Backend {
    fn name(&self) -> BackendName;

    /// Used at startup to verify all configurations are available to work with
    /// the backend.
    async fn health_check(&self) -> Result<()>;

    /// Sends the whole conversation, oldest first, and returns the reply text.
    async fn get_completion(&self, turns: &[ChatTurn]) -> Result<String>;

    /// Single image request with its own instructions. Used for the
    /// biometric scan, which expects a JSON document back.
    async fn analyze_image(&self, image: &ImageData, prompt: &str, system: &str)
        -> Result<String>;
}

pub type BackendBox = Arc<dyn Backend + Send + Sync>;
