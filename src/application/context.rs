use std::path;
use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;
use chrono::Duration;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::BackendBox;
use crate::domain::models::BackendName;
use crate::domain::models::ClockBox;
use crate::domain::models::DocumentRendererBox;
use crate::domain::models::IdGenerator;
use crate::domain::models::Language;
use crate::domain::models::ListenerBox;
use crate::domain::models::SpeakerBox;
use crate::domain::models::SpeechName;
use crate::domain::models::StorageBox;
use crate::domain::models::SystemClock;
use crate::domain::services::AuthGate;
use crate::domain::services::BiometricScanner;
use crate::domain::services::CatalogStore;
use crate::domain::services::ChatOrchestrator;
use crate::domain::services::CredentialTable;
use crate::domain::services::SessionStore;
use crate::infrastructure::backends::BackendManager;
use crate::infrastructure::renderers::RendererManager;
use crate::infrastructure::speech::SpeechManager;
use crate::infrastructure::storage::StorageManager;

/// Collaborators built from the loaded configuration.
pub struct AppContext {
    pub storage: StorageBox,
    pub clock: ClockBox,
    pub renderer: DocumentRendererBox,
    ids: IdGenerator,
}

impl AppContext {
    pub fn from_config() -> AppContext {
        let clock: ClockBox = Arc::<SystemClock>::default();
        return AppContext {
            storage: StorageManager::get(&Config::get(ConfigKey::DataDir)),
            ids: IdGenerator::new(clock.clone()),
            clock,
            renderer: RendererManager::get(),
        };
    }

    pub fn data_dir() -> path::PathBuf {
        return path::PathBuf::from(Config::get(ConfigKey::DataDir));
    }

    pub fn username() -> String {
        return Config::get(ConfigKey::Username);
    }

    pub fn language() -> Result<Language> {
        let name = Config::get(ConfigKey::Language);
        match Language::parse(name.to_string()) {
            Some(language) => return Ok(language),
            None => bail!(format!("Unsupported language '{name}'")),
        }
    }

    /// Every collaborator mints from the same sequence.
    pub fn ids(&self) -> IdGenerator {
        return self.ids.clone();
    }

    pub fn sessions(&self) -> SessionStore {
        return SessionStore::new(self.storage.clone());
    }

    pub fn catalog(&self) -> CatalogStore {
        return CatalogStore::new(self.storage.clone());
    }

    pub fn auth_gate(&self) -> Result<AuthGate> {
        let table = CredentialTable::parse(&Config::get(ConfigKey::Credentials))?;
        let ttl_hours = Config::get(ConfigKey::AuthTtlHours).parse::<i64>()?;
        if ttl_hours <= 0 {
            bail!("auth-ttl-hours must be a positive number of hours");
        }

        return Ok(AuthGate::new(
            self.storage.clone(),
            self.clock.clone(),
            Arc::new(table),
            Duration::hours(ttl_hours),
        ));
    }

    pub async fn backend(&self) -> Result<BackendBox> {
        let name = Config::get(ConfigKey::Backend);
        let backend_name = match BackendName::parse(name.to_string()) {
            Some(backend_name) => backend_name,
            None => bail!(format!("Unsupported backend '{name}'")),
        };

        return BackendManager::get(
            backend_name,
            Config::get_bool(ConfigKey::MockFallback),
            &Config::get(ConfigKey::FallbackFile),
        )
        .await;
    }

    pub fn speaker(&self) -> Result<SpeakerBox> {
        let name = Config::get(ConfigKey::Speaker);
        let speech_name = match SpeechName::parse(name.to_string()) {
            Some(speech_name) => speech_name,
            None => bail!(format!("Unsupported speaker '{name}'")),
        };

        return SpeechManager::get_speaker(speech_name, &Config::get(ConfigKey::SpeakerCommand));
    }

    pub fn listener(&self) -> Result<ListenerBox> {
        return SpeechManager::get_listener(&Config::get(ConfigKey::ListenerCommand));
    }

    pub fn scanner(&self, backend: BackendBox) -> BiometricScanner {
        return BiometricScanner::new(backend, self.clock.clone());
    }

    pub async fn chat(&self, backend: BackendBox) -> Result<ChatOrchestrator> {
        return Ok(ChatOrchestrator::load(
            backend,
            self.sessions(),
            self.speaker()?,
            self.ids(),
            AppContext::language()?,
        )
        .await);
    }
}
