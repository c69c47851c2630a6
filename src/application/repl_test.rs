use std::sync::Arc;

use anyhow::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Duration;
use test_utils::biometrics_fixture;

use super::help_text;
use super::Flow;
use super::Repl;
use crate::domain::models::BackendBox;
use crate::domain::models::IdGenerator;
use crate::domain::models::Language;
use crate::domain::models::Role;
use crate::domain::models::StorageBox;
use crate::domain::models::StorageKey;
use crate::domain::services::testing::CountingStorage;
use crate::domain::services::testing::FakeBackend;
use crate::domain::services::testing::ManualClock;
use crate::domain::services::testing::RecordingSpeaker;
use crate::domain::services::AuthGate;
use crate::domain::services::BiometricScanner;
use crate::domain::services::ChatOrchestrator;
use crate::domain::services::CredentialTable;
use crate::domain::services::SessionStore;
use crate::infrastructure::renderers::markdown::MarkdownRenderer;
use crate::infrastructure::speech::noop::NoopListener;

const PNG_BYTES: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

async fn repl(backend: Arc<FakeBackend>) -> Result<(Repl<Vec<u8>>, Arc<CountingStorage>)> {
    let storage = Arc::<CountingStorage>::default();
    let clock = Arc::<ManualClock>::default();
    let chat = ChatOrchestrator::load(
        backend.clone() as BackendBox,
        SessionStore::new(storage.clone() as StorageBox),
        Arc::<RecordingSpeaker>::default(),
        IdGenerator::new(clock.clone()),
        Language::Es,
    )
    .await;
    let auth = AuthGate::new(
        storage.clone(),
        clock.clone(),
        Arc::new(CredentialTable::parse("demo:demo123")?),
        Duration::hours(24),
    );

    let repl = Repl::new(
        chat,
        BiometricScanner::new(backend, clock),
        Arc::<NoopListener>::default(),
        Arc::<MarkdownRenderer>::default(),
        auth,
        "Ana",
        vec![],
    );

    return Ok((repl, storage));
}

fn output(repl: &mut Repl<Vec<u8>>) -> String {
    let res = String::from_utf8_lossy(&repl.out).to_string();
    repl.out.clear();
    return res;
}

#[test]
fn it_lists_every_command_in_help() {
    let text = help_text();
    assert!(text.starts_with("COMMANDS:"));
    for command in [
        "/image", "/listen", "/scan", "/export", "/history", "/open", "/new", "/voice",
        "/language", "/logout", "/quit", "/help",
    ] {
        assert!(text.contains(command), "missing {command}");
    }
}

#[tokio::test]
async fn it_greets_fresh_consultations() -> Result<()> {
    let (mut repl, _) = repl(FakeBackend::replying("Reposo.")).await?;
    repl.greet()?;
    assert!(output(&mut repl).contains("¿En qué puedo asistirle hoy?"));
    return Ok(());
}

#[tokio::test]
async fn it_sends_plain_lines() -> Result<()> {
    let (mut repl, storage) = repl(FakeBackend::replying("Reposo e hidratación.")).await?;

    let flow = repl.handle_line("fiebre y tos").await?;

    assert_eq!(flow, Flow::Continue);
    let out = output(&mut repl);
    assert!(out.contains("Analizando..."));
    assert!(out.contains("Reposo e hidratación."));
    assert_eq!(repl.chat.transcript().len(), 2);
    assert_eq!(storage.write_count(StorageKey::History), 1);
    return Ok(());
}

#[tokio::test]
async fn it_ignores_empty_lines_with_an_empty_draft() -> Result<()> {
    let backend = FakeBackend::replying("Reposo.");
    let (mut repl, _) = repl(backend.clone()).await?;

    repl.handle_line("   ").await?;

    assert_eq!(output(&mut repl), "");
    assert_eq!(backend.call_count(), 0);
    return Ok(());
}

#[tokio::test]
async fn it_reports_failed_replies() -> Result<()> {
    let (mut repl, storage) = repl(FakeBackend::failing()).await?;

    repl.handle_line("fiebre y tos").await?;

    assert!(output(&mut repl).contains("No se obtuvo respuesta."));
    assert_eq!(repl.chat.transcript().len(), 1);
    assert_eq!(storage.write_count(StorageKey::History), 0);
    return Ok(());
}

#[tokio::test]
async fn it_rejects_unknown_commands() -> Result<()> {
    let backend = FakeBackend::replying("Reposo.");
    let (mut repl, _) = repl(backend.clone()).await?;

    repl.handle_line("/teleport").await?;

    assert!(output(&mut repl).contains("Unknown command '/teleport'"));
    assert_eq!(backend.call_count(), 0);
    return Ok(());
}

#[tokio::test]
async fn it_lists_and_opens_history() -> Result<()> {
    let (mut repl, _) = repl(FakeBackend::replying("Reposo.")).await?;

    repl.handle_line("/history").await?;
    assert!(output(&mut repl).contains("There are no stored consultations yet."));

    repl.handle_line("dolor de cabeza").await?;
    let id = repl.chat.session_id().unwrap_or_default().to_string();
    repl.handle_line("/new").await?;
    assert!(repl.chat.transcript().is_empty());
    output(&mut repl);

    repl.handle_line("/hs").await?;
    assert!(output(&mut repl).contains(&format!("(ID: {id})")));

    repl.handle_line(&format!("/open {id}")).await?;
    assert_eq!(repl.chat.transcript().len(), 2);
    assert!(output(&mut repl).contains("dolor de cabeza"));

    repl.handle_line("/o 42").await?;
    assert!(output(&mut repl).contains("No consultation found with ID 42"));
    return Ok(());
}

#[tokio::test]
async fn it_attaches_and_removes_images() -> Result<()> {
    let dir = tempdir::TempDir::new("medchat-repl")?;
    let image_path = dir.path().join("rash.png");
    tokio::fs::write(&image_path, STANDARD.decode(PNG_BYTES)?).await?;
    let (mut repl, _) = repl(FakeBackend::replying("Parece una dermatitis.")).await?;

    repl.handle_line(&format!("/image {}", image_path.display()))
        .await?;
    assert!(repl.chat.image().is_some());
    repl.handle_line("/i").await?;
    assert!(repl.chat.image().is_none());

    repl.handle_line(&format!("/i {}", image_path.display()))
        .await?;
    repl.handle_line("").await?;

    let first = &repl.chat.transcript()[0];
    assert_eq!(first.role, Role::User);
    assert_eq!(first.content, "");
    assert!(first.image.is_some());
    return Ok(());
}

#[tokio::test]
async fn it_reports_unreadable_images() -> Result<()> {
    let (mut repl, _) = repl(FakeBackend::replying("Reposo.")).await?;

    repl.handle_line("/i notes.txt").await?;

    assert!(output(&mut repl).contains("Unsupported image extension 'txt'"));
    assert!(repl.chat.image().is_none());
    return Ok(());
}

#[tokio::test]
async fn it_reports_listener_errors() -> Result<()> {
    let (mut repl, _) = repl(FakeBackend::replying("Reposo.")).await?;

    repl.handle_line("/listen").await?;

    assert!(output(&mut repl).contains("Speech recognition is not configured."));
    assert_eq!(repl.chat.text(), "");
    return Ok(());
}

#[tokio::test]
async fn it_exports_transcripts() -> Result<()> {
    let dir = tempdir::TempDir::new("medchat-repl")?;
    let (mut repl, _) = repl(FakeBackend::replying("Reposo.")).await?;

    repl.handle_line(&format!("/x {}", dir.path().display()))
        .await?;
    assert!(output(&mut repl).contains("The consultation has no messages to export"));

    repl.handle_line("fiebre").await?;
    output(&mut repl);
    repl.handle_line(&format!("/export {}", dir.path().display()))
        .await?;

    let file_path = dir.path().join("Consulta_20260112_093000.md");
    assert!(output(&mut repl).contains("Saved"));
    let body = tokio::fs::read_to_string(file_path).await?;
    assert!(body.contains("## Ana\n\nfiebre"));
    return Ok(());
}

#[tokio::test]
async fn it_records_scans() -> Result<()> {
    let dir = tempdir::TempDir::new("medchat-repl")?;
    let image_path = dir.path().join("face.png");
    tokio::fs::write(&image_path, STANDARD.decode(PNG_BYTES)?).await?;
    let (mut repl, storage) = repl(FakeBackend::replying(biometrics_fixture())).await?;

    repl.handle_line(&format!("/scan {}", image_path.display()))
        .await?;

    let out = output(&mut repl);
    assert!(out.contains("INFORME DE FENOTIPADO DIGITAL"));
    assert!(out.contains("**VFC (HRV):** 62ms"));
    assert_eq!(repl.chat.transcript().len(), 1);
    assert_eq!(storage.write_count(StorageKey::History), 1);
    return Ok(());
}

#[tokio::test]
async fn it_switches_language_and_voice() -> Result<()> {
    let (mut repl, _) = repl(FakeBackend::replying("Reposo.")).await?;

    repl.handle_line("/lang en").await?;
    assert_eq!(repl.chat.language(), Language::En);
    repl.handle_line("/lang fr").await?;
    assert!(output(&mut repl).contains("Unsupported language 'fr'"));

    repl.handle_line("/v").await?;
    assert!(repl.chat.voice_enabled());
    repl.handle_line("/voice").await?;
    assert!(!repl.chat.voice_enabled());
    return Ok(());
}

#[tokio::test]
async fn it_quits_and_logs_out() -> Result<()> {
    let (mut repl, storage) = repl(FakeBackend::replying("Reposo.")).await?;
    repl.auth.login("demo", "demo123").await?;
    assert!(repl.auth.restore().await.is_some());

    assert_eq!(repl.handle_line("/q").await?, Flow::Quit);
    assert!(repl.auth.restore().await.is_some());

    assert_eq!(repl.handle_line("/logout").await?, Flow::Quit);
    assert!(repl.auth.restore().await.is_none());
    assert_eq!(storage.write_count(StorageKey::Auth), 1);
    return Ok(());
}
