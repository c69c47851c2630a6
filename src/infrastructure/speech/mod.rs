pub mod command;
pub mod noop;

use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::ListenerBox;
use crate::domain::models::SpeakerBox;
use crate::domain::models::SpeechName;

pub struct SpeechManager {}

impl SpeechManager {
    pub fn get_speaker(name: SpeechName, command: &str) -> Result<SpeakerBox> {
        if name == SpeechName::None {
            return Ok(Arc::<noop::NoopSpeaker>::default());
        }

        if command.trim().is_empty() {
            bail!("Speaker 'command' needs 'speaker-command' to be set");
        }

        return Ok(Arc::new(command::CommandSpeaker::new(command)?));
    }

    /// Listening is enabled whenever a listener command is configured.
    pub fn get_listener(command: &str) -> Result<ListenerBox> {
        if command.trim().is_empty() {
            return Ok(Arc::<noop::NoopListener>::default());
        }

        return Ok(Arc::new(command::CommandListener::new(command)?));
    }
}
