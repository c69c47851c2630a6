pub mod markdown;

use std::sync::Arc;

use crate::domain::models::DocumentRendererBox;

pub struct RendererManager {}

impl RendererManager {
    pub fn get() -> DocumentRendererBox {
        return Arc::<markdown::MarkdownRenderer>::default();
    }
}
