use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub mod migrate;

/// Overrides the configuration directory (`~/.protip365` otherwise).
pub const HOME_ENV: &str = "PROTIP365_HOME";
/// Overrides `access_token` from the file.
pub const TOKEN_ENV: &str = "PROTIP365_ACCESS_TOKEN";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Local,
    Remote,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default)]
    pub backend: Backend,
    #[serde(default)]
    pub supabase_url: String,
    #[serde(default)]
    pub supabase_anon_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default)]
    pub user_id: String,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_currency_symbol() -> String {
    "$".to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}
fn default_separator_char() -> String {
    "-".to_string()
}

/// Keys every config file is expected to carry.
pub const EXPECTED_KEYS: [&str; 8] = [
    "database",
    "backend",
    "supabase_url",
    "supabase_anon_key",
    "user_id",
    "currency_symbol",
    "log_level",
    "separator_char",
];

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            backend: Backend::Local,
            supabase_url: String::new(),
            supabase_anon_key: String::new(),
            access_token: None,
            user_id: String::new(),
            currency_symbol: default_currency_symbol(),
            log_level: default_log_level(),
            separator_char: default_separator_char(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if let Ok(custom) = env::var(HOME_ENV)
            && !custom.trim().is_empty()
        {
            return PathBuf::from(custom);
        }
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("protip365")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".protip365")
        }
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("protip365.conf")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("protip365.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    /// `PROTIP365_ACCESS_TOKEN` wins over the stored token.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        let mut cfg = if path.exists() {
            let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
            serde_yaml::from_str(&content)?
        } else {
            Config::default()
        };

        if let Ok(token) = env::var(TOKEN_ENV)
            && !token.trim().is_empty()
        {
            cfg.access_token = Some(token);
        }
        Ok(cfg)
    }

    pub fn save(&self) -> AppResult<()> {
        self.save_to(&Self::config_file())
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|_| AppError::ConfigSave)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml).map_err(|_| AppError::ConfigSave)?;
        Ok(())
    }

    /// A relative `--db` name lives in the config directory.
    pub fn resolve_database(name: &str) -> PathBuf {
        let p = crate::utils::path::expand_tilde(name);
        if p.is_absolute() {
            p
        } else {
            Self::config_dir().join(p)
        }
    }

    /// Create the config directory, the config file (unless `is_test`) and
    /// an empty database file. A fresh user id is generated.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) => Self::resolve_database(name),
            None => Self::database_file(),
        };

        // keep an existing identity when re-initialising
        let previous = Self::load().ok();
        let user_id = previous
            .as_ref()
            .map(|c| c.user_id.clone())
            .filter(|id| Uuid::parse_str(id).is_ok())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            user_id,
            ..previous.unwrap_or_default()
        };

        if !is_test {
            config.save()?;
        }

        if !db_path.exists() {
            if let Some(parent) = db_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::File::create(&db_path)?;
        }

        Ok(config)
    }

    /// The configured user id. A local store without one works as the nil
    /// user; the remote store needs a real id.
    pub fn user_uuid(&self) -> AppResult<Uuid> {
        let raw = self.user_id.trim();
        if raw.is_empty() {
            return match self.backend {
                Backend::Local => Ok(Uuid::nil()),
                Backend::Remote => Err(AppError::Config(
                    "user_id is not set; run `protip365 init` or edit the config".into(),
                )),
            };
        }
        Uuid::parse_str(raw).map_err(|_| AppError::InvalidId(raw.to_string()))
    }

    /// Settings the remote backend cannot work without.
    pub fn remote_problems(&self) -> Vec<String> {
        let mut out = Vec::new();
        if self.supabase_url.trim().is_empty() {
            out.push("supabase_url is empty".to_string());
        }
        if self.supabase_anon_key.trim().is_empty() {
            out.push("supabase_anon_key is empty".to_string());
        }
        if Uuid::parse_str(self.user_id.trim()).is_err() {
            out.push("user_id is not a valid UUID".to_string());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let cfg: Config = serde_yaml::from_str("database: /tmp/x.sqlite\n").unwrap();
        assert_eq!(cfg.backend, Backend::Local);
        assert_eq!(cfg.currency_symbol, "$");
        assert_eq!(cfg.log_level, "warn");
        assert_eq!(cfg.user_uuid().unwrap(), Uuid::nil());
    }

    #[test]
    fn remote_backend_requires_settings() {
        let cfg: Config = serde_yaml::from_str("backend: remote\n").unwrap();
        assert!(cfg.user_uuid().is_err());
        assert_eq!(cfg.remote_problems().len(), 3);
    }

    #[test]
    fn save_and_load_round_trip() {
        let path = env::temp_dir().join(format!("protip365-cfg-{}.conf", Uuid::new_v4()));
        let cfg = Config {
            user_id: Uuid::new_v4().to_string(),
            currency_symbol: "€".into(),
            ..Config::default()
        };
        cfg.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.user_id, cfg.user_id);
        assert_eq!(loaded.currency_symbol, "€");
        let _ = fs::remove_file(path);
    }
}
