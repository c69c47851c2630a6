#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Utc;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::ImageData;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_emergency: Option<bool>,
}

impl Message {
    pub fn new(id: String, role: Role, content: &str, timestamp: DateTime<Utc>) -> Message {
        return Message {
            id,
            role,
            content: content.to_string(),
            timestamp,
            image: None,
            is_emergency: None,
        };
    }

    pub fn with_image(mut self, image: Option<&ImageData>) -> Message {
        self.image = image.map(|e| return e.to_data_uri());
        return self;
    }

    pub fn image_data(&self) -> Option<ImageData> {
        let uri = self.image.as_ref()?;
        match ImageData::parse(uri) {
            Ok(image) => return Some(image),
            Err(err) => {
                tracing::warn!(id = self.id, err = ?err, "Message holds an unreadable image");
                return None;
            }
        }
    }

    pub fn is_user(&self) -> bool {
        return self.role == Role::User;
    }

    /// First line of the content, cut to `max_chars` characters with a
    /// trailing ellipsis when longer.
    pub fn headline(&self, max_chars: usize) -> String {
        let line = self.content.split('\n').next().unwrap_or_default();
        if line.chars().count() <= max_chars {
            return line.to_string();
        }

        let cut = line
            .chars()
            .take(max_chars.saturating_sub(3))
            .collect::<String>();
        return format!("{cut}...");
    }
}
