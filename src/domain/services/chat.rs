#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;

use crate::domain::models::BackendBox;
use crate::domain::models::ChatTurn;
use crate::domain::models::History;
use crate::domain::models::IdGenerator;
use crate::domain::models::ImageData;
use crate::domain::models::Language;
use crate::domain::models::Message;
use crate::domain::models::Role;
use crate::domain::models::ScanResult;
use crate::domain::models::Session;
use crate::domain::models::SpeakerBox;
use crate::domain::services::SessionStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    Composing,
    Sending,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TurnOutcome {
    /// Nothing to send.
    Skipped,
    /// A request is already in flight.
    Busy,
    Replied(Message),
    Failed,
}

/// Holds the turn in `Sending` and resets it to `Idle` on drop, including
/// when the caller abandons the `send` future mid-request.
struct InFlight<'a> {
    state: &'a mut TurnState,
}

impl<'a> InFlight<'a> {
    fn start(state: &'a mut TurnState) -> InFlight<'a> {
        *state = TurnState::Sending;
        return InFlight { state };
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.state = TurnState::Idle;
    }
}

/// Drives a consultation: compose buffers, one in-flight request at a time,
/// and persistence of the transcript after every successful reply.
pub struct ChatOrchestrator {
    backend: BackendBox,
    sessions: SessionStore,
    speaker: SpeakerBox,
    ids: IdGenerator,
    language: Language,
    voice_enabled: bool,
    history: History,
    session_id: Option<String>,
    transcript: Vec<Message>,
    text: String,
    image: Option<ImageData>,
    state: TurnState,
}

impl ChatOrchestrator {
    /// Builds the orchestrator with the stored history already loaded.
    pub async fn load(
        backend: BackendBox,
        sessions: SessionStore,
        speaker: SpeakerBox,
        ids: IdGenerator,
        language: Language,
    ) -> ChatOrchestrator {
        let history = sessions.load().await;
        tracing::debug!(sessions = history.len(), "Loaded session history");

        return ChatOrchestrator {
            backend,
            sessions,
            speaker,
            ids,
            language,
            voice_enabled: false,
            history,
            session_id: None,
            transcript: vec![],
            text: "".to_string(),
            image: None,
            state: TurnState::Idle,
        };
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.compose();
    }

    pub fn append_text(&mut self, text: &str) {
        if !self.text.is_empty() && !self.text.ends_with(' ') {
            self.text.push(' ');
        }
        self.text.push_str(text);
        self.compose();
    }

    pub fn attach_image(&mut self, image: ImageData) {
        self.image = Some(image);
        self.compose();
    }

    pub fn clear_image(&mut self) {
        self.image = None;
        self.compose();
    }

    fn compose(&mut self) {
        if self.state != TurnState::Sending {
            self.state = TurnState::Composing;
        }
    }

    pub async fn send(&mut self) -> TurnOutcome {
        if self.state == TurnState::Sending {
            return TurnOutcome::Busy;
        }

        let text = self.text.trim().to_string();
        if text.is_empty() && self.image.is_none() {
            return TurnOutcome::Skipped;
        }

        let message = Message::new(self.ids.next_id(), Role::User, &text, self.ids.now())
            .with_image(self.image.as_ref());
        self.transcript.push(message);
        self.text = "".to_string();
        self.image = None;

        let turns = ChatTurn::from_transcript(&self.transcript);
        let in_flight = InFlight::start(&mut self.state);
        let res = self.backend.get_completion(&turns).await;
        drop(in_flight);

        let reply = match res {
            Ok(reply) => reply,
            Err(err) => {
                tracing::error!(
                    backend = self.backend.name().to_string(),
                    err = ?err,
                    "Chat request failed"
                );
                return TurnOutcome::Failed;
            }
        };

        let message = Message::new(self.ids.next_id(), Role::Assistant, &reply, self.ids.now());
        self.transcript.push(message.clone());
        self.persist().await;

        if self.voice_enabled {
            self.speaker.speak(&reply, self.language);
        }

        return TurnOutcome::Replied(message);
    }

    /// Appends the scan summary as an assistant message and saves the
    /// consultation.
    pub async fn record_scan(&mut self, scan: &ScanResult) -> Message {
        let message = Message::new(
            self.ids.next_id(),
            Role::Assistant,
            &scan.summary(),
            self.ids.now(),
        )
        .with_image(scan.image.as_ref());

        self.transcript.push(message.clone());
        self.persist().await;
        return message;
    }

    async fn persist(&mut self) {
        let id = match &self.session_id {
            Some(id) => id.to_string(),
            None => {
                let id = self.ids.next_id();
                self.session_id = Some(id.to_string());
                id
            }
        };

        let session = Session::new(
            &id,
            self.ids.now(),
            &self.transcript,
            self.language.new_consultation(),
        );
        let history = std::mem::take(&mut self.history);
        self.history = self.sessions.save(session, history).await;
    }

    pub fn new_session(&mut self) {
        self.speaker.stop();
        self.transcript = vec![];
        self.session_id = None;
        self.text = "".to_string();
        self.image = None;
        self.state = TurnState::Idle;
    }

    /// Makes a stored consultation the active one. Returns false when no
    /// session has that id.
    pub fn open_session(&mut self, id: &str) -> bool {
        let session = match self.history.find(id) {
            Some(session) => session,
            None => return false,
        };

        self.transcript = session.messages.to_vec();
        self.session_id = Some(session.id.to_string());
        self.text = "".to_string();
        self.image = None;
        self.state = TurnState::Idle;
        return true;
    }

    pub fn set_voice(&mut self, enabled: bool) {
        self.voice_enabled = enabled;
        if enabled {
            self.speaker
                .speak(self.language.voice_enabled(), self.language);
        } else {
            self.speaker.stop();
        }
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn language(&self) -> Language {
        return self.language;
    }

    pub fn voice_enabled(&self) -> bool {
        return self.voice_enabled;
    }

    pub fn state(&self) -> TurnState {
        return self.state;
    }

    pub fn transcript(&self) -> &[Message] {
        return &self.transcript;
    }

    pub fn history(&self) -> &History {
        return &self.history;
    }

    pub fn session_id(&self) -> Option<&str> {
        return self.session_id.as_deref();
    }

    pub fn text(&self) -> &str {
        return &self.text;
    }

    pub fn image(&self) -> Option<&ImageData> {
        return self.image.as_ref();
    }
}
