use anyhow::Result;
use test_utils::fallback_responses_fixture;
use test_utils::png_data_uri;

use super::FallbackResponses;
use super::Mock;
use crate::domain::models::Backend;
use crate::domain::models::ChatTurn;
use crate::domain::models::ImageData;
use crate::domain::models::Role;

fn turn(text: &str) -> ChatTurn {
    return ChatTurn {
        role: Role::User,
        content: text.to_string(),
        image: None,
    };
}

#[test]
fn it_parses_response_files() -> Result<()> {
    let res = FallbackResponses::parse(fallback_responses_fixture())?;
    assert_eq!(
        res.responses(),
        &[
            "Respuesta de prueba uno.".to_string(),
            "Respuesta de prueba dos.".to_string()
        ]
    );
    return Ok(());
}

#[test]
fn it_rejects_empty_response_files() {
    let err = FallbackResponses::parse("responses = []").unwrap_err();
    assert_eq!(err.to_string(), "Fallback responses file has no responses");

    let err = FallbackResponses::parse("replies = [\"hola\"]").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Fallback responses file needs a 'responses' array"
    );

    assert!(FallbackResponses::parse("responses = [1, 2]").is_err());
}

#[tokio::test]
async fn it_uses_builtin_responses_without_a_file() -> Result<()> {
    let res = FallbackResponses::load("").await?;
    assert_eq!(res.responses().len(), 3);
    return Ok(());
}

#[tokio::test]
async fn it_loads_response_files() -> Result<()> {
    let dir = tempdir::TempDir::new("medchat-fallback")?;
    let file_path = dir.path().join("fallback.toml");
    tokio::fs::write(&file_path, fallback_responses_fixture()).await?;

    let res = FallbackResponses::load(&file_path.to_string_lossy()).await?;
    assert_eq!(res.responses().len(), 2);
    return Ok(());
}

#[tokio::test]
async fn it_replies_with_a_canned_response() -> Result<()> {
    let responses = FallbackResponses::parse(fallback_responses_fixture())?;
    let backend = Mock::new(responses.clone());

    let reply = backend.get_completion(&[turn("fiebre y tos")]).await?;
    assert!(responses.responses().contains(&reply));
    return Ok(());
}

#[tokio::test]
async fn it_refuses_image_analysis() -> Result<()> {
    let backend = Mock::default();
    let image = ImageData::parse(png_data_uri())?;

    assert!(backend.analyze_image(&image, "prompt", "system").await.is_err());
    return Ok(());
}
