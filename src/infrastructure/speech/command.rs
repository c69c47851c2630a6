#[cfg(test)]
#[path = "command_test.rs"]
mod tests;

use std::process::Stdio;
use std::sync::Mutex;

use anyhow::bail;
use anyhow::Result;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

use crate::domain::models::clean_for_speech;
use crate::domain::models::ErrorCallback;
use crate::domain::models::Language;
use crate::domain::models::Listener;
use crate::domain::models::ResultCallback;
use crate::domain::models::Speaker;

/// Environment variable carrying the locale (`es-ES`, `en-US`) to the
/// external command.
pub const LOCALE_ENV: &str = "MEDCHAT_SPEECH_LOCALE";

fn split_command(command: &str) -> Result<(String, Vec<String>)> {
    let mut parts = command.split_whitespace().map(|e| return e.to_string());
    let program = match parts.next() {
        Some(program) => program,
        None => bail!("Speech command is empty"),
    };

    return Ok((program, parts.collect()));
}

/// Speaks through an external program (`espeak-ng`, `say`, ...) that reads
/// the text from stdin. A new utterance interrupts the previous one.
pub struct CommandSpeaker {
    program: String,
    args: Vec<String>,
    playing: Mutex<Option<CancellationToken>>,
}

impl CommandSpeaker {
    pub fn new(command: &str) -> Result<CommandSpeaker> {
        let (program, args) = split_command(command)?;
        return Ok(CommandSpeaker {
            program,
            args,
            playing: Mutex::new(None),
        });
    }

    async fn play(
        program: String,
        args: Vec<String>,
        text: String,
        language: Language,
        cancel_token: CancellationToken,
    ) -> Result<()> {
        let mut child = Command::new(&program)
            .args(&args)
            .env(LOCALE_ENV, language.locale())
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await?;
        }

        tokio::select! {
            _ = cancel_token.cancelled() => {
                child.kill().await?;
            }
            status = child.wait() => {
                let status = status?;
                if !status.success() {
                    bail!(format!("{program} exited with {status}"));
                }
            }
        }

        return Ok(());
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&self, text: &str, language: Language) {
        let text = clean_for_speech(text);
        if text.is_empty() {
            return;
        }

        let cancel_token = CancellationToken::new();
        if let Ok(mut playing) = self.playing.lock() {
            if let Some(prev) = playing.replace(cancel_token.clone()) {
                prev.cancel();
            }
        }

        let program = self.program.to_string();
        let args = self.args.clone();
        tokio::spawn(async move {
            if let Err(err) =
                CommandSpeaker::play(program, args, text, language, cancel_token).await
            {
                tracing::warn!(err = ?err, "Speech playback failed");
            }
        });
    }

    fn stop(&self) {
        if let Ok(mut playing) = self.playing.lock() {
            if let Some(token) = playing.take() {
                token.cancel();
            }
        }
    }
}

/// Recognizes speech through an external program that records from the
/// microphone and prints the transcript on stdout.
pub struct CommandListener {
    program: String,
    args: Vec<String>,
}

impl CommandListener {
    pub fn new(command: &str) -> Result<CommandListener> {
        let (program, args) = split_command(command)?;
        return Ok(CommandListener { program, args });
    }

    async fn transcribe(program: String, args: Vec<String>, language: Language) -> Result<String> {
        let output = Command::new(&program)
            .args(&args)
            .env(LOCALE_ENV, language.locale())
            .stdin(Stdio::null())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            bail!(format!("{program} exited with {}: {stderr}", output.status));
        }

        let text = String::from_utf8(output.stdout)?.trim().to_string();
        if text.is_empty() {
            bail!("No speech was recognized");
        }

        return Ok(text);
    }
}

impl Listener for CommandListener {
    fn listen(&self, on_result: ResultCallback, on_error: ErrorCallback, language: Language) {
        let program = self.program.to_string();
        let args = self.args.clone();
        tokio::spawn(async move {
            match CommandListener::transcribe(program, args, language).await {
                Ok(text) => on_result(text),
                Err(err) => {
                    tracing::warn!(err = ?err, "Speech recognition failed");
                    on_error(err.to_string());
                }
            }
        });
    }
}
