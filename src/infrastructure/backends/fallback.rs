#[cfg(test)]
#[path = "fallback_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;

use super::mock::FallbackResponses;
use crate::domain::models::Backend;
use crate::domain::models::BackendBox;
use crate::domain::models::BackendName;
use crate::domain::models::ChatTurn;
use crate::domain::models::ImageData;

/// Wraps a backend so a failed chat request still produces a reply, taken
/// from the canned responses. Image analysis is passed through untouched,
/// the scanner has its own fallback payload.
pub struct Fallback {
    primary: BackendBox,
    responses: FallbackResponses,
}

impl Fallback {
    pub fn new(primary: BackendBox, responses: FallbackResponses) -> Fallback {
        return Fallback { primary, responses };
    }
}

#[async_trait]
impl Backend for Fallback {
    fn name(&self) -> BackendName {
        return self.primary.name();
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        return self.primary.health_check().await;
    }

    #[allow(clippy::implicit_return)]
    async fn get_completion(&self, turns: &[ChatTurn]) -> Result<String> {
        match self.primary.get_completion(turns).await {
            Ok(reply) => return Ok(reply),
            Err(err) => {
                tracing::warn!(
                    backend = self.primary.name().to_string(),
                    err = ?err,
                    "Completion failed, using a canned response"
                );
                return Ok(self.responses.pick());
            }
        }
    }

    #[allow(clippy::implicit_return)]
    async fn analyze_image(
        &self,
        image: &ImageData,
        prompt: &str,
        system: &str,
    ) -> Result<String> {
        return self.primary.analyze_image(image, prompt, system).await;
    }
}
