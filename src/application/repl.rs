#[cfg(test)]
#[path = "repl_test.rs"]
mod tests;

use std::io;
use std::io::Write;
use std::path;

use anyhow::bail;
use anyhow::Result;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use yansi::Paint;

use crate::application::context::AppContext;
use crate::application::views::render_session;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::DocumentRendererBox;
use crate::domain::models::ImageData;
use crate::domain::models::Language;
use crate::domain::models::ListenerBox;
use crate::domain::models::Message;
use crate::domain::models::Role;
use crate::domain::models::SlashCommand;
use crate::domain::services::AuthGate;
use crate::domain::services::BiometricScanner;
use crate::domain::services::ChatOrchestrator;
use crate::domain::services::TurnOutcome;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /image (/i) [PATH?] - Attaches an image to your next message. Without a PATH the attached image is removed.
- /listen (/l) - Dictates your next message through the configured listener command. Press enter to send it.
- /scan (/s) [PATH] - Runs a biometric scan on a face photo and adds the summary to the consultation.
- /export (/x) [DIR?] - Exports the consultation as a Markdown document, to the current directory by default.
- /history (/hs) - Lists stored consultations, newest first.
- /open (/o) [SESSION_ID] - Continues a stored consultation.
- /new (/n) - Starts a new consultation.
- /voice (/v) - Toggles reading replies aloud.
- /language (/lang) [es,en] - Switches the language for speech and new consultations.
- /logout - Forgets the stored login and exits.
- /quit /exit (/q) - Exit MedChat.
- /help (/h) - Provides this help menu.

Empty lines send whatever is waiting in the draft, such as dictated text or an image on its own.
        "#;

    return text.trim().to_string();
}

const ASSISTANT_NAME: &str = "Doctor IA";

pub fn format_message(msg: &Message, username: &str) -> String {
    let author = match msg.role {
        Role::User => Paint::green(username).bold().to_string(),
        Role::Assistant => Paint::cyan(ASSISTANT_NAME).bold().to_string(),
    };

    let mut lines = vec![
        format!("{author} {}", Paint::new(msg.timestamp.format("%H:%M")).dimmed()),
        msg.content.trim().to_string(),
    ];

    if msg.image.is_some() {
        lines.push(Paint::new("[imagen adjunta]").dimmed().to_string());
    }

    if msg.is_emergency == Some(true) {
        lines.push(
            Paint::red("Posible emergencia: acuda a urgencias o llame al 112.")
                .bold()
                .to_string(),
        );
    }

    return lines.join("\n");
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Line oriented chat front end. Every line is either a slash command or
/// text for the draft, and plain lines send the draft right away.
pub struct Repl<W: Write> {
    chat: ChatOrchestrator,
    scanner: BiometricScanner,
    listener: ListenerBox,
    renderer: DocumentRendererBox,
    auth: AuthGate,
    username: String,
    out: W,
}

impl<W: Write> Repl<W> {
    pub fn new(
        chat: ChatOrchestrator,
        scanner: BiometricScanner,
        listener: ListenerBox,
        renderer: DocumentRendererBox,
        auth: AuthGate,
        username: &str,
        out: W,
    ) -> Repl<W> {
        return Repl {
            chat,
            scanner,
            listener,
            renderer,
            auth,
            username: username.to_string(),
            out,
        };
    }

    /// Prints the welcome for a fresh consultation, or replays the
    /// transcript of an opened one.
    pub fn greet(&mut self) -> Result<()> {
        if self.chat.transcript().is_empty() {
            let welcome = self.chat.language().welcome();
            writeln!(
                self.out,
                "{}\n{}\n",
                Paint::cyan(ASSISTANT_NAME).bold(),
                welcome
            )?;
            return Ok(());
        }

        let lines = self
            .chat
            .transcript()
            .iter()
            .map(|msg| return format_message(msg, &self.username))
            .collect::<Vec<String>>();
        writeln!(self.out, "{}\n", lines.join("\n\n"))?;
        return Ok(());
    }

    fn prompt(&mut self) -> Result<()> {
        let mut marker = "›".to_string();
        if self.chat.image().is_some() {
            marker = format!("[img] {marker}");
        }
        if !self.chat.text().is_empty() {
            marker = format!("[{}] {marker}", self.chat.text());
        }

        write!(self.out, "{} ", Paint::green(marker).bold())?;
        self.out.flush()?;
        return Ok(());
    }

    fn error(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", Paint::red(text))?;
        return Ok(());
    }

    pub async fn handle_line(&mut self, line: &str) -> Result<Flow> {
        let line = line.trim();

        if line.starts_with('/') {
            return match SlashCommand::parse(line) {
                Some(command) => self.handle_command(command).await,
                None => {
                    self.error(&format!(
                        "Unknown command '{line}'. Type /help to see what is available."
                    ))?;
                    Ok(Flow::Continue)
                }
            };
        }

        if !line.is_empty() {
            self.chat.append_text(line);
        }
        self.send().await?;

        return Ok(Flow::Continue);
    }

    async fn handle_command(&mut self, command: SlashCommand) -> Result<Flow> {
        if command.is_quit() {
            return Ok(Flow::Quit);
        }

        if command.is_logout() {
            self.auth.logout().await;
            writeln!(self.out, "Session closed.")?;
            return Ok(Flow::Quit);
        }

        if command.is_help() {
            writeln!(self.out, "{}", help_text())?;
        } else if command.is_new_session() {
            self.chat.new_session();
            self.greet()?;
        } else if command.is_history() {
            self.print_history()?;
        } else if command.is_open_session() {
            let id = command.rest();
            if self.chat.open_session(&id) {
                self.greet()?;
            } else {
                self.error(&format!("No consultation found with ID {id}"))?;
            }
        } else if command.is_attach_image() {
            let file_path = path::PathBuf::from(command.rest());
            match ImageData::from_path(&file_path).await {
                Ok(image) => {
                    self.chat.attach_image(image);
                    writeln!(
                        self.out,
                        "Attached {}. Type your message or press enter to send it.",
                        file_path.display()
                    )?;
                }
                Err(err) => self.error(&err.to_string())?,
            }
        } else if command.is_clear_image() {
            self.chat.clear_image();
            writeln!(self.out, "Image removed.")?;
        } else if command.is_voice() {
            let enabled = !self.chat.voice_enabled();
            self.chat.set_voice(enabled);
            let state = if enabled { "on" } else { "off" };
            writeln!(self.out, "Voice {state}.")?;
        } else if command.is_listen() {
            self.listen().await?;
        } else if command.is_export() {
            self.export(&command.rest()).await?;
        } else if command.is_language() {
            match Language::parse(command.rest()) {
                Some(language) => {
                    self.chat.set_language(language);
                    writeln!(self.out, "Language set to {language}.")?;
                }
                None => self.error(&format!("Unsupported language '{}'", command.rest()))?,
            }
        } else if command.is_scan() {
            self.scan(&command.rest()).await?;
        }

        return Ok(Flow::Continue);
    }

    async fn send(&mut self) -> Result<()> {
        if self.chat.text().is_empty() && self.chat.image().is_none() {
            return Ok(());
        }

        writeln!(
            self.out,
            "{}",
            Paint::new(self.chat.language().thinking()).dimmed()
        )?;

        match self.chat.send().await {
            TurnOutcome::Replied(msg) => {
                writeln!(self.out, "\n{}\n", format_message(&msg, &self.username))?;
            }
            TurnOutcome::Failed => {
                let text = self.chat.language().no_reply();
                self.error(text)?;
            }
            TurnOutcome::Busy => {
                writeln!(self.out, "{}", Paint::yellow("A reply is still on its way."))?;
            }
            TurnOutcome::Skipped => {}
        }

        return Ok(());
    }

    fn print_history(&mut self) -> Result<()> {
        let lines = self
            .chat
            .history()
            .latest_first()
            .iter()
            .map(|session| return render_session(session))
            .collect::<Vec<String>>();

        if lines.is_empty() {
            writeln!(self.out, "There are no stored consultations yet.")?;
        } else {
            writeln!(self.out, "{}", lines.join("\n"))?;
        }

        return Ok(());
    }

    async fn listen(&mut self) -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Result<String, String>>();
        let err_tx = tx.clone();

        writeln!(self.out, "{}", Paint::new("Listening...").dimmed())?;
        self.listener.listen(
            Box::new(move |text| {
                let _ = tx.send(Ok(text));
            }),
            Box::new(move |err| {
                let _ = err_tx.send(Err(err));
            }),
            self.chat.language(),
        );

        match rx.recv().await {
            Some(Ok(text)) => {
                self.chat.append_text(&text);
                writeln!(
                    self.out,
                    "Heard: {text}\nPress enter to send, or keep typing to add to it."
                )?;
            }
            Some(Err(err)) => self.error(&err)?,
            None => self.error("The listener stopped without a result")?,
        }

        return Ok(());
    }

    async fn export(&mut self, dir: &str) -> Result<()> {
        let dir = if dir.is_empty() { "." } else { dir };
        let res = self
            .renderer
            .transcript(self.chat.transcript(), &self.username);

        let doc = match res {
            Ok(doc) => doc,
            Err(err) => return self.error(&err.to_string()),
        };

        match doc.write_to(&path::PathBuf::from(dir)).await {
            Ok(file_path) => writeln!(self.out, "Saved {}", file_path.display())?,
            Err(err) => self.error(&format!("Failed to save the export: {err}"))?,
        }

        return Ok(());
    }

    async fn scan(&mut self, file_path: &str) -> Result<()> {
        let image = match ImageData::from_path(&path::PathBuf::from(file_path)).await {
            Ok(image) => image,
            Err(err) => return self.error(&err.to_string()),
        };

        writeln!(self.out, "{}", Paint::new("Scanning...").dimmed())?;
        let scan = self.scanner.analyze(image).await;
        let msg = self.chat.record_scan(&scan).await;
        writeln!(self.out, "\n{}\n", format_message(&msg, &self.username))?;

        return Ok(());
    }
}

pub async fn start(ctx: AppContext) -> Result<()> {
    let backend = ctx.backend().await?;
    if let Err(err) = backend.health_check().await {
        tracing::warn!(backend = backend.name().to_string(), err = ?err, "Backend health check failed");
        eprintln!(
            "{}",
            Paint::yellow(format!(
                "The {} backend is not reachable ({err}). Replies may fall back to canned responses.",
                backend.name()
            ))
        );
    }

    let mut chat = ctx.chat(backend.clone()).await?;
    let session_id = Config::get(ConfigKey::SessionID);
    if !session_id.is_empty() && !chat.open_session(&session_id) {
        bail!(format!("No consultation found with ID {session_id}"));
    }

    let mut repl = Repl::new(
        chat,
        ctx.scanner(backend),
        ctx.listener()?,
        ctx.renderer.clone(),
        ctx.auth_gate()?,
        &AppContext::username(),
        io::stdout(),
    );
    repl.greet()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        repl.prompt()?;
        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break,
        };

        if repl.handle_line(&line).await? == Flow::Quit {
            break;
        }
    }

    return Ok(());
}
