#[cfg(test)]
#[path = "mock_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use rand::seq::SliceRandom;
use tokio::fs;

use crate::domain::models::Backend;
use crate::domain::models::BackendName;
use crate::domain::models::ChatTurn;
use crate::domain::models::ImageData;

/// Canned replies used when no model is reachable. Loaded from a TOML file
/// holding a `responses` string array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FallbackResponses {
    responses: Vec<String>,
}

impl Default for FallbackResponses {
    fn default() -> FallbackResponses {
        return FallbackResponses {
            responses: vec![
                "Analizando biomarcadores...\n\nSegún los síntomas descritos se aprecia una posible inflamación sistémica leve. Se sugiere un protocolo de desintoxicación con cúrcuma y jengibre orgánico.".to_string(),
                "Revisión completada.\n\nSe observan patrones compatibles con una deficiencia de micronutrientes esenciales. Conviene priorizar una alimentación rica en minerales y consultar una analítica reciente.".to_string(),
                "Protocolo integrativo activo.\n\nSu estado metabólico muestra signos de estrés oxidativo. Inicie un ciclo de antioxidantes naturales y asegure una buena hidratación.".to_string(),
            ],
        };
    }
}

impl FallbackResponses {
    pub fn parse(text: &str) -> Result<FallbackResponses> {
        let doc = text.parse::<toml_edit::Document>()?;
        let array = match doc.get("responses").and_then(|e| return e.as_array()) {
            Some(array) => array,
            None => bail!("Fallback responses file needs a 'responses' array"),
        };

        let mut responses = vec![];
        for val in array.iter() {
            match val.as_str() {
                Some(text) if !text.trim().is_empty() => responses.push(text.to_string()),
                Some(_) => continue,
                None => bail!("Fallback responses must be strings"),
            }
        }

        if responses.is_empty() {
            bail!("Fallback responses file has no responses");
        }

        return Ok(FallbackResponses { responses });
    }

    /// Reads the responses file, or the built-in responses when no file is
    /// configured.
    pub async fn load(file_path: &str) -> Result<FallbackResponses> {
        if file_path.is_empty() {
            return Ok(FallbackResponses::default());
        }

        let text = fs::read_to_string(file_path).await?;
        return FallbackResponses::parse(&text);
    }

    pub fn responses(&self) -> &[String] {
        return &self.responses;
    }

    pub fn pick(&self) -> String {
        return self
            .responses
            .choose(&mut rand::thread_rng())
            .map(|e| return e.to_string())
            .unwrap_or_default();
    }
}

/// Offline backend answering every chat turn with a canned response.
#[derive(Default)]
pub struct Mock {
    responses: FallbackResponses,
}

impl Mock {
    pub fn new(responses: FallbackResponses) -> Mock {
        return Mock { responses };
    }
}

#[async_trait]
impl Backend for Mock {
    fn name(&self) -> BackendName {
        return BackendName::Mock;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn get_completion(&self, turns: &[ChatTurn]) -> Result<String> {
        if turns.is_empty() {
            bail!("Nothing to reply to");
        }

        return Ok(self.responses.pick());
    }

    #[allow(clippy::implicit_return)]
    async fn analyze_image(
        &self,
        _image: &ImageData,
        _prompt: &str,
        _system: &str,
    ) -> Result<String> {
        bail!("The mock backend cannot analyze images");
    }
}
