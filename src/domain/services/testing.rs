use std::sync::Arc;
use std::sync::Mutex;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use chrono::DateTime;
use chrono::Duration;
use chrono::TimeZone;
use chrono::Utc;

use crate::domain::models::Backend;
use crate::domain::models::BackendName;
use crate::domain::models::ChatTurn;
use crate::domain::models::Clock;
use crate::domain::models::ImageData;
use crate::domain::models::Language;
use crate::domain::models::Speaker;
use crate::domain::models::Storage;
use crate::domain::models::StorageKey;
use crate::infrastructure::storage::memory::MemoryStorage;

/// Clock the test moves by hand.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl Default for ManualClock {
    fn default() -> ManualClock {
        return ManualClock {
            now: Mutex::new(Utc.with_ymd_and_hms(2026, 1, 12, 9, 30, 0).unwrap()),
        };
    }
}

impl ManualClock {
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now = *now + by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        return *self.now.lock().unwrap();
    }
}

/// Backend returning a scripted reply, or failing, and recording every
/// request it receives. A stalled backend never answers chat requests.
#[derive(Default)]
pub struct FakeBackend {
    pub reply: Option<String>,
    pub stalled: bool,
    pub calls: Mutex<Vec<Vec<ChatTurn>>>,
    pub images: Mutex<Vec<ImageData>>,
}

impl FakeBackend {
    pub fn replying(reply: &str) -> Arc<FakeBackend> {
        return Arc::new(FakeBackend {
            reply: Some(reply.to_string()),
            ..FakeBackend::default()
        });
    }

    pub fn failing() -> Arc<FakeBackend> {
        return Arc::new(FakeBackend::default());
    }

    pub fn stalled() -> Arc<FakeBackend> {
        return Arc::new(FakeBackend {
            stalled: true,
            ..FakeBackend::default()
        });
    }

    pub fn call_count(&self) -> usize {
        return self.calls.lock().unwrap().len() + self.images.lock().unwrap().len();
    }
}

#[async_trait]
impl Backend for FakeBackend {
    fn name(&self) -> BackendName {
        return BackendName::Mock;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn get_completion(&self, turns: &[ChatTurn]) -> Result<String> {
        self.calls.lock().unwrap().push(turns.to_vec());
        if self.stalled {
            std::future::pending::<()>().await;
        }
        match &self.reply {
            Some(reply) => return Ok(reply.to_string()),
            None => bail!("backend unavailable"),
        }
    }

    #[allow(clippy::implicit_return)]
    async fn analyze_image(&self, image: &ImageData, _prompt: &str, _system: &str) -> Result<String> {
        self.images.lock().unwrap().push(image.clone());
        match &self.reply {
            Some(reply) => return Ok(reply.to_string()),
            None => bail!("backend unavailable"),
        }
    }
}

#[derive(Default)]
pub struct RecordingSpeaker {
    pub spoken: Mutex<Vec<(String, Language)>>,
    pub stops: Mutex<usize>,
}

impl Speaker for RecordingSpeaker {
    fn speak(&self, text: &str, language: Language) {
        self.spoken.lock().unwrap().push((text.to_string(), language));
    }

    fn stop(&self) {
        *self.stops.lock().unwrap() += 1;
    }
}

/// Storage whose reads and writes always fail, counting write attempts.
#[derive(Default)]
pub struct BrokenStorage {
    pub writes: Mutex<usize>,
}

#[async_trait]
impl Storage for BrokenStorage {
    #[allow(clippy::implicit_return)]
    async fn get(&self, _key: StorageKey) -> Result<Option<String>> {
        bail!("disk unavailable");
    }

    #[allow(clippy::implicit_return)]
    async fn set(&self, _key: StorageKey, _value: &str) -> Result<()> {
        *self.writes.lock().unwrap() += 1;
        bail!("disk unavailable");
    }

    #[allow(clippy::implicit_return)]
    async fn remove(&self, _key: StorageKey) -> Result<()> {
        bail!("disk unavailable");
    }
}

/// In-memory storage that records every write.
#[derive(Default)]
pub struct CountingStorage {
    inner: MemoryStorage,
    pub writes: Mutex<Vec<(StorageKey, String)>>,
}

impl CountingStorage {
    pub fn write_count(&self, key: StorageKey) -> usize {
        return self
            .writes
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _)| return *k == key)
            .count();
    }
}

#[async_trait]
impl Storage for CountingStorage {
    #[allow(clippy::implicit_return)]
    async fn get(&self, key: StorageKey) -> Result<Option<String>> {
        return self.inner.get(key).await;
    }

    #[allow(clippy::implicit_return)]
    async fn set(&self, key: StorageKey, value: &str) -> Result<()> {
        self.writes
            .lock()
            .unwrap()
            .push((key, value.to_string()));
        return self.inner.set(key, value).await;
    }

    #[allow(clippy::implicit_return)]
    async fn remove(&self, key: StorageKey) -> Result<()> {
        return self.inner.remove(key).await;
    }
}
