#[cfg(test)]
#[path = "file_test.rs"]
mod tests;

use std::path;

use anyhow::Result;
use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::models::Storage;
use crate::domain::models::StorageKey;

/// One `<key>.json` file per key inside a data directory.
pub struct FileStorage {
    pub data_dir: path::PathBuf,
}

impl FileStorage {
    pub fn new(data_dir: path::PathBuf) -> FileStorage {
        return FileStorage { data_dir };
    }

    fn get_file_path(&self, key: StorageKey) -> path::PathBuf {
        return self.data_dir.join(format!("{key}.json"));
    }
}

#[async_trait]
impl Storage for FileStorage {
    #[allow(clippy::implicit_return)]
    async fn get(&self, key: StorageKey) -> Result<Option<String>> {
        let file_path = self.get_file_path(key);
        if !file_path.exists() {
            return Ok(None);
        }

        let payload = fs::read_to_string(file_path).await?;
        return Ok(Some(payload));
    }

    #[allow(clippy::implicit_return)]
    async fn set(&self, key: StorageKey, value: &str) -> Result<()> {
        if !self.data_dir.exists() {
            fs::create_dir_all(&self.data_dir).await?;
        }

        let file_path = self.get_file_path(key);
        let tmp_path = file_path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp_path).await?;
        file.write_all(value.as_bytes()).await?;
        file.sync_all().await?;
        fs::rename(tmp_path, file_path).await?;

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn remove(&self, key: StorageKey) -> Result<()> {
        let file_path = self.get_file_path(key);
        if !file_path.exists() {
            return Ok(());
        }

        fs::remove_file(file_path).await?;
        return Ok(());
    }
}
