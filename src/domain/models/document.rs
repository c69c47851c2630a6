use std::path;
use std::sync::Arc;

use anyhow::Result;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::Message;
use super::Prescription;
use super::ScanResult;

/// A rendered, ready to save export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub file_name: String,
    pub body: String,
}

impl Document {
    pub async fn write_to(&self, dir: &path::Path) -> Result<path::PathBuf> {
        if !dir.exists() {
            fs::create_dir_all(dir).await?;
        }

        let file_path = dir.join(&self.file_name);
        let mut file = fs::File::create(&file_path).await?;
        file.write_all(self.body.as_bytes()).await?;

        return Ok(file_path);
    }
}

pub trait DocumentRenderer {
    fn transcript(&self, messages: &[Message], username: &str) -> Result<Document>;
    fn prescription(&self, prescription: &Prescription) -> Result<Document>;
    fn scan(&self, scan: &ScanResult) -> Result<Document>;
}

pub type DocumentRendererBox = Arc<dyn DocumentRenderer + Send + Sync>;
