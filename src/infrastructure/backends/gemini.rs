#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Backend;
use crate::domain::models::BackendName;
use crate::domain::models::ChatTurn;
use crate::domain::models::ImageData;
use crate::domain::models::Role;

pub const SYSTEM_INSTRUCTION: &str = r#"You are "Doctor IA PRO", a digital medical assistant that combines natural, homeopathic and allopathic medicine.

Personality and tone:
- Speak with the authority of a senior clinician and the warmth of a mentor.
- Explain with scientific rigour (biochemistry, physiology) and illustrate complex points with short clinical stories.
- Avoid generic advice. Tailor every answer to the patient's case.

Answer format:
- Reply in the language the patient writes in.
- Structure recommendations as protocols: Nivel 1 (natural), Nivel 2 (metabolic), Nivel 3 (complementary allopathic).
- When symptoms suggest an emergency, say so first and tell the patient to seek in-person care immediately.
- You do not replace a licensed physician. Remind the patient to confirm any treatment with one."#;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContentPartsBlob {
    mime_type: String,
    data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
enum ContentParts {
    Text(String),
    InlineData(ContentPartsBlob),
}

impl From<&ImageData> for ContentParts {
    fn from(image: &ImageData) -> ContentParts {
        return ContentParts::InlineData(ContentPartsBlob {
            mime_type: image.mime_type().to_string(),
            data: image.data().to_string(),
        });
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<ContentParts>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> GenerationConfig {
        return GenerationConfig {
            temperature: 0.7,
            top_p: 0.95,
            max_output_tokens: 2048,
        };
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompletionRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    fn text(&self) -> String {
        return self
            .candidates
            .first()
            .and_then(|e| return e.content.as_ref())
            .map(|content| {
                return content
                    .parts
                    .iter()
                    .filter_map(|e| return e.text.as_deref())
                    .collect::<String>();
            })
            .unwrap_or_default();
    }
}

fn to_content(turn: &ChatTurn) -> Content {
    let role = match turn.role {
        Role::User => "user",
        Role::Assistant => "model",
    };

    let mut parts = vec![];
    if !turn.content.is_empty() || turn.image.is_none() {
        parts.push(ContentParts::Text(turn.content.to_string()));
    }
    if let Some(image) = &turn.image {
        parts.push(ContentParts::from(image));
    }

    return Content {
        role: Some(role.to_string()),
        parts,
    };
}

fn system_content(text: &str) -> Content {
    return Content {
        role: None,
        parts: vec![ContentParts::Text(text.to_string())],
    };
}

pub struct Gemini {
    url: String,
    token: String,
    model: String,
    timeout: String,
}

impl Default for Gemini {
    fn default() -> Gemini {
        return Gemini {
            url: Config::get(ConfigKey::GeminiURL),
            token: Config::get(ConfigKey::GeminiToken),
            model: Config::get(ConfigKey::Model),
            timeout: Config::get(ConfigKey::BackendTimeout),
        };
    }
}

impl Gemini {
    fn timeout(&self) -> Result<Duration> {
        return Ok(Duration::from_millis(self.timeout.parse::<u64>()?));
    }

    async fn generate(&self, req: &CompletionRequest) -> Result<String> {
        if self.token.is_empty() {
            bail!("Gemini token is not defined");
        }

        let res = reqwest::Client::new()
            .post(format!(
                "{url}/v1beta/models/{model}:generateContent?key={key}",
                url = self.url,
                model = self.model,
                key = self.token,
            ))
            .timeout(self.timeout()?)
            .json(req)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to make completion request to Gemini"
            );
            bail!(format!(
                "Failed to make completion request to Gemini, {}",
                res.status().as_u16()
            ));
        }

        let text = res.json::<GenerateContentResponse>().await?.text();
        if text.is_empty() {
            bail!("Empty response from Gemini");
        }

        return Ok(text);
    }
}

#[async_trait]
impl Backend for Gemini {
    fn name(&self) -> BackendName {
        return BackendName::Gemini;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("Gemini URL is not defined");
        }
        if self.token.is_empty() {
            bail!("Gemini token is not defined");
        }

        let url = format!(
            "{url}/v1beta/models/{model}?key={key}",
            url = self.url,
            model = self.model,
            key = self.token
        );

        let res = reqwest::Client::new()
            .get(&url)
            .timeout(self.timeout()?)
            .send()
            .await;

        let status = match res {
            Ok(res) => res.status().as_u16(),
            Err(err) => {
                tracing::error!(error = ?err, "Gemini is not reachable");
                bail!("Gemini is not reachable");
            }
        };

        if status >= 400 {
            tracing::error!(status = status, "Gemini health check failed");
            bail!("Gemini health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn get_completion(&self, turns: &[ChatTurn]) -> Result<String> {
        let req = CompletionRequest {
            system_instruction: system_content(SYSTEM_INSTRUCTION),
            contents: turns.iter().map(to_content).collect(),
            generation_config: Some(GenerationConfig::default()),
        };

        tracing::debug!(turns = turns.len(), model = self.model, "Gemini completion");
        return self.generate(&req).await;
    }

    #[allow(clippy::implicit_return)]
    async fn analyze_image(
        &self,
        image: &ImageData,
        prompt: &str,
        system: &str,
    ) -> Result<String> {
        let req = CompletionRequest {
            system_instruction: system_content(system),
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    ContentParts::Text(prompt.to_string()),
                    ContentParts::from(image),
                ],
            }],
            generation_config: None,
        };

        tracing::debug!(
            mime_type = image.mime_type(),
            bytes = image.byte_len(),
            model = self.model,
            "Gemini image analysis"
        );
        return self.generate(&req).await;
    }
}
