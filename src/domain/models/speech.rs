#[cfg(test)]
#[path = "speech_test.rs"]
mod tests;

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

use super::Language;

#[derive(Clone, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum SpeechName {
    Command,
    None,
}

impl SpeechName {
    pub fn parse(text: String) -> Option<SpeechName> {
        return SpeechName::iter().find(|e| return e.to_string() == text);
    }
}

pub type ResultCallback = Box<dyn FnOnce(String) + Send>;
pub type ErrorCallback = Box<dyn FnOnce(String) + Send>;

/// Text to speech. Calls return immediately, playback happens in the
/// background.
pub trait Speaker {
    fn speak(&self, text: &str, language: Language);
    fn stop(&self);
}

/// Speech to text. Exactly one of the callbacks is invoked per call.
pub trait Listener {
    fn listen(&self, on_result: ResultCallback, on_error: ErrorCallback, language: Language);
}

pub type SpeakerBox = Arc<dyn Speaker + Send + Sync>;
pub type ListenerBox = Arc<dyn Listener + Send + Sync>;

static BOLD: Lazy<Regex> = Lazy::new(|| return Regex::new(r"\*\*(.*?)\*\*").unwrap());
static LEVEL: Lazy<Regex> = Lazy::new(|| return Regex::new(r"Nivel \d:").unwrap());
static LINK: Lazy<Regex> = Lazy::new(|| return Regex::new(r"\[(.*?)\]\((.*?)\)").unwrap());

/// Strips the Markdown a model reply carries so it reads naturally aloud.
pub fn clean_for_speech(text: &str) -> String {
    let text = BOLD.replace_all(text, "$1");
    let text = text.replace("###", "");
    let text = LEVEL.replace_all(&text, "");
    let text = LINK.replace_all(&text, "$1");

    return text.trim().to_string();
}
