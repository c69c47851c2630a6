use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use test_utils::fallback_responses_fixture;
use test_utils::png_data_uri;

use super::Fallback;
use crate::domain::models::Backend;
use crate::domain::models::BackendName;
use crate::domain::models::ChatTurn;
use crate::domain::models::ImageData;
use crate::domain::models::Role;
use crate::infrastructure::backends::mock::FallbackResponses;

struct Scripted {
    reply: Option<&'static str>,
}

#[async_trait]
impl Backend for Scripted {
    fn name(&self) -> BackendName {
        return BackendName::Gemini;
    }

    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    async fn get_completion(&self, _turns: &[ChatTurn]) -> Result<String> {
        match self.reply {
            Some(reply) => return Ok(reply.to_string()),
            None => bail!("connection refused"),
        }
    }

    async fn analyze_image(
        &self,
        _image: &ImageData,
        _prompt: &str,
        _system: &str,
    ) -> Result<String> {
        bail!("connection refused");
    }
}

fn turns() -> Vec<ChatTurn> {
    return vec![ChatTurn {
        role: Role::User,
        content: "fiebre y tos".to_string(),
        image: None,
    }];
}

#[tokio::test]
async fn it_passes_through_successful_replies() -> Result<()> {
    let backend = Fallback::new(
        Arc::new(Scripted {
            reply: Some("Reposo."),
        }),
        FallbackResponses::parse(fallback_responses_fixture())?,
    );

    assert_eq!(backend.name(), BackendName::Gemini);
    assert_eq!(backend.get_completion(&turns()).await?, "Reposo.");
    return Ok(());
}

#[tokio::test]
async fn it_substitutes_a_canned_reply_on_failure() -> Result<()> {
    let responses = FallbackResponses::parse(fallback_responses_fixture())?;
    let backend = Fallback::new(Arc::new(Scripted { reply: None }), responses.clone());

    let reply = backend.get_completion(&turns()).await?;
    assert!(responses.responses().contains(&reply));
    return Ok(());
}

#[tokio::test]
async fn it_does_not_mask_image_failures() -> Result<()> {
    let backend = Fallback::new(
        Arc::new(Scripted { reply: None }),
        FallbackResponses::default(),
    );
    let image = ImageData::parse(png_data_uri())?;

    assert!(backend.analyze_image(&image, "p", "s").await.is_err());
    return Ok(());
}
