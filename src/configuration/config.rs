#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::env;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

use crate::domain::models::BackendName;
use crate::domain::models::Language;
use crate::domain::models::SpeechName;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    AuthTtlHours,
    Backend,
    BackendTimeout,
    ConfigFile,
    Credentials,
    DataDir,
    FallbackFile,
    GeminiToken,
    GeminiURL,
    Language,
    ListenerCommand,
    MockFallback,
    Model,
    SessionID,
    Speaker,
    SpeakerCommand,
    Username,
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn get_bool(key: ConfigKey) -> bool {
        return Config::get(key) == "true";
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        if key == ConfigKey::Username {
            let mut user = env::var("USER").unwrap_or_else(|_| return "".to_string());
            if user.is_empty() {
                user = "Paciente".to_string();
            }

            return user;
        }

        #[cfg(not(target_os = "macos"))]
        let config_path = dirs::config_dir()
            .unwrap_or_default()
            .join("medchat/config.toml");
        #[cfg(target_os = "macos")]
        let config_path = path::PathBuf::from(env::var("HOME").unwrap_or_default())
            .join(".config/medchat/config.toml");

        let data_dir = dirs::data_dir().unwrap_or_default().join("medchat");

        let res = match key {
            ConfigKey::AuthTtlHours => "24".to_string(),
            ConfigKey::Backend => BackendName::Gemini.to_string(),
            ConfigKey::BackendTimeout => "30000".to_string(),
            ConfigKey::Credentials => "invitado:demo123,demo:demo123".to_string(),
            ConfigKey::DataDir => data_dir.to_string_lossy().to_string(),
            ConfigKey::FallbackFile => "".to_string(),
            ConfigKey::GeminiToken => "".to_string(),
            ConfigKey::GeminiURL => "https://generativelanguage.googleapis.com".to_string(),
            ConfigKey::Language => Language::default().to_string(),
            ConfigKey::ListenerCommand => "".to_string(),
            ConfigKey::MockFallback => "true".to_string(),
            ConfigKey::Model => "gemini-2.0-flash-exp".to_string(),
            ConfigKey::Speaker => SpeechName::None.to_string(),
            ConfigKey::SpeakerCommand => "".to_string(),

            // Special
            ConfigKey::ConfigFile => config_path.to_string_lossy().to_string(),
            ConfigKey::SessionID => "".to_string(),
            ConfigKey::Username => "".to_string(),
        };

        return res;
    }

    fn possible_values(cmd: &Command, key: ConfigKey) -> Vec<String> {
        let arg = cmd
            .get_arguments()
            .find(|e| return e.get_long() == Some(key.to_string().as_str()));

        return match arg {
            Some(arg) => arg
                .get_possible_values()
                .iter()
                .map(|e| return e.get_name().to_string())
                .collect(),
            None => vec![],
        };
    }

    pub async fn load(cmd: Command, clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                let val = match doc.get(&key.to_string()) {
                    Some(val) => val,
                    None => continue,
                };

                if let Some(val_int) = val.as_integer() {
                    Config::set(key, &val_int.to_string());
                } else if let Some(val_bool) = val.as_bool() {
                    Config::set(key, &val_bool.to_string());
                } else if let Some(val_str) = val.as_str() {
                    if val_str.is_empty() {
                        continue;
                    }

                    // Use clap value parsers to do validation.
                    let possible_values = Config::possible_values(&cmd, key);
                    if !possible_values.is_empty()
                        && !possible_values.contains(&val_str.to_string())
                    {
                        bail!(format!("config.toml has an invalid value for key '{key}': {val_str}\nPossible values are: {}", possible_values.join(", ")));
                    }
                    Config::set(key, val_str);
                } else {
                    bail!(format!("config.toml has an unsupported value type for key '{key}'"));
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                }
            }
        }

        tracing::debug!(
            username = Config::get(ConfigKey::Username),
            backend = Config::get(ConfigKey::Backend),
            model = Config::get(ConfigKey::Model),
            language = Config::get(ConfigKey::Language),
            speaker = Config::get(ConfigKey::Speaker),
            data_dir = Config::get(ConfigKey::DataDir),
            mock_fallback = Config::get(ConfigKey::MockFallback),
            "config"
        );

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::SessionID || key == ConfigKey::ConfigFile {
                    return None;
                }

                if key == ConfigKey::Username {
                    return Some(
                        "# Name shown on your messages and exported documents.\n# username = \"\""
                            .to_string(),
                    );
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))?;

                let mut description = arg
                    .get_help()
                    .map(|e| return e.to_string())
                    .unwrap_or_default()
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                if !arg.get_possible_values().is_empty() {
                    let possible_values = arg
                        .get_possible_values()
                        .iter()
                        .map(|e| return e.get_name())
                        .collect::<Vec<_>>()
                        .join(", ");
                    description = format!("{description} [possible values: {}]", possible_values);
                }

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else if val.parse::<i64>().is_ok() || val.parse::<bool>().is_ok() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{}\"", val.replace('\\', "\\\\"));
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
