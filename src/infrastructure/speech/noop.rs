#[cfg(test)]
#[path = "noop_test.rs"]
mod tests;

use crate::domain::models::ErrorCallback;
use crate::domain::models::Language;
use crate::domain::models::Listener;
use crate::domain::models::ResultCallback;
use crate::domain::models::Speaker;

#[derive(Default)]
pub struct NoopSpeaker {}

impl Speaker for NoopSpeaker {
    fn speak(&self, _text: &str, _language: Language) {}

    fn stop(&self) {}
}

#[derive(Default)]
pub struct NoopListener {}

impl Listener for NoopListener {
    fn listen(&self, _on_result: ResultCallback, on_error: ErrorCallback, _language: Language) {
        on_error(
            "Speech recognition is not configured. Set 'listener-command' to enable it."
                .to_string(),
        );
    }
}
