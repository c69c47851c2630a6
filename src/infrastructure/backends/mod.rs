pub mod fallback;
pub mod gemini;
pub mod mock;

use std::sync::Arc;

use anyhow::Result;

use crate::domain::models::BackendBox;
use crate::domain::models::BackendName;

pub struct BackendManager {}

impl BackendManager {
    /// Builds the configured backend. With `with_fallback` set, a failed
    /// chat request on a real backend answers from `fallback_file` instead.
    pub async fn get(
        name: BackendName,
        with_fallback: bool,
        fallback_file: &str,
    ) -> Result<BackendBox> {
        let responses = mock::FallbackResponses::load(fallback_file).await?;

        if name == BackendName::Mock {
            return Ok(Arc::new(mock::Mock::new(responses)));
        }

        let backend: BackendBox = Arc::<gemini::Gemini>::default();
        if with_fallback {
            return Ok(Arc::new(fallback::Fallback::new(backend, responses)));
        }

        return Ok(backend);
    }
}
