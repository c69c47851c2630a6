use std::time::Duration;

use anyhow::Result;
use tokio::sync::oneshot;

use super::CommandListener;
use super::CommandSpeaker;
use crate::domain::models::Language;
use crate::domain::models::Listener;
use crate::domain::models::Speaker;

async fn listen(listener: &CommandListener) -> Result<String, String> {
    let (tx_ok, rx_ok) = oneshot::channel::<String>();
    let (tx_err, rx_err) = oneshot::channel::<String>();
    listener.listen(
        Box::new(move |text| {
            let _ = tx_ok.send(text);
        }),
        Box::new(move |err| {
            let _ = tx_err.send(err);
        }),
        Language::Es,
    );

    tokio::select! {
        Ok(text) = rx_ok => return Ok(text),
        Ok(err) = rx_err => return Err(err),
    }
}

#[test]
fn it_rejects_empty_commands() {
    assert!(CommandSpeaker::new("  ").is_err());
    assert!(CommandListener::new("").is_err());
}

#[tokio::test]
async fn it_returns_the_transcript_from_stdout() -> Result<()> {
    let listener = CommandListener::new("echo me duele la cabeza")?;
    assert_eq!(listen(&listener).await, Ok("me duele la cabeza".to_string()));
    return Ok(());
}

#[tokio::test]
async fn it_reports_failed_recognition() -> Result<()> {
    let listener = CommandListener::new("false")?;
    assert!(listen(&listener).await.is_err());

    let listener = CommandListener::new("true")?;
    assert_eq!(
        listen(&listener).await,
        Err("No speech was recognized".to_string())
    );
    return Ok(());
}

#[tokio::test]
async fn it_pipes_cleaned_text_to_the_speaker() -> Result<()> {
    let dir = tempdir::TempDir::new("medchat-speech")?;
    let out = dir.path().join("spoken.txt");
    let speaker = CommandSpeaker::new(&format!("tee {}", out.to_string_lossy()))?;

    speaker.speak("**Nivel 1:** infusión de manzanilla", Language::Es);

    let mut spoken = "".to_string();
    for _ in 0..100 {
        spoken = tokio::fs::read_to_string(&out).await.unwrap_or_default();
        if !spoken.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    assert_eq!(spoken, "infusión de manzanilla");
    return Ok(());
}
