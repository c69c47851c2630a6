pub mod file;
pub mod memory;

use std::path;
use std::sync::Arc;

use crate::domain::models::StorageBox;

pub struct StorageManager {}

impl StorageManager {
    /// File storage rooted at `data_dir`, or process memory when it is empty.
    pub fn get(data_dir: &str) -> StorageBox {
        if data_dir.is_empty() {
            return Arc::<memory::MemoryStorage>::default();
        }

        return Arc::new(file::FileStorage::new(path::PathBuf::from(data_dir)));
    }
}
