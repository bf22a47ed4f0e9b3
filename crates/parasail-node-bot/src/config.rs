/*
[INPUT]:  JSON configuration file (privateKey, wallet_address, bearer_token)
[OUTPUT]: Parsed bot configuration and atomic session write-back
[POS]:    Configuration layer - persisted key/value store
[UPDATE]: When adding configuration fields or changing the file format
*/

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use parasail_adapter::{ParasailError, Session, SessionStore};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Default configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("config {path} has an empty privateKey")]
    MissingPrivateKey { path: PathBuf },

    #[error("failed to write config: {0}")]
    Write(#[from] std::io::Error),

    #[error("failed to encode config: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to replace config file: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("config lock poisoned")]
    Poisoned,
}

/// On-disk configuration record.
///
/// Unknown fields are kept and written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(rename = "privateKey", alias = "private_key")]
    pub private_key: String,
    #[serde(default, alias = "walletAddress", skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
    #[serde(default, alias = "bearerCredential", skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BotConfig {
    /// Session as persisted; a blank token counts as absent
    pub fn session(&self) -> Session {
        Session::new(
            self.wallet_address.clone().unwrap_or_default(),
            self.bearer_token.clone(),
        )
    }
}

/// Config file plus its in-memory copy
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    config: Mutex<BotConfig>,
}

impl ConfigStore {
    /// Read and validate the config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config: BotConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?;

        if config.private_key.trim().is_empty() {
            return Err(ConfigError::MissingPrivateKey { path });
        }

        Ok(Self {
            path,
            config: Mutex::new(config),
        })
    }

    pub fn config(&self) -> Result<BotConfig, ConfigError> {
        self.config
            .lock()
            .map(|guard| guard.clone())
            .map_err(|_| ConfigError::Poisoned)
    }

    /// Record the new address and token, then rewrite the file.
    ///
    /// `privateKey` is carried over unchanged.
    pub fn save_session(&self, session: &Session) -> Result<(), ConfigError> {
        let mut guard = self.config.lock().map_err(|_| ConfigError::Poisoned)?;
        guard.wallet_address = Some(session.wallet_address.clone());
        guard.bearer_token = session.bearer_token.clone();
        write_atomically(&self.path, &guard)
    }
}

impl SessionStore for ConfigStore {
    fn save(&self, session: &Session) -> parasail_adapter::Result<()> {
        self.save_session(session)
            .map_err(|err| ParasailError::Persistence(err.to_string()))
    }
}

fn write_atomically(path: &Path, config: &BotConfig) -> Result<(), ConfigError> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(parent_dir)?;
    let json_str = serde_json::to_string_pretty(config)?;
    temp_file.write_all(json_str.as_bytes())?;
    temp_file.flush()?;
    temp_file.persist(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PK: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn write_config(dir: &TempDir, value: serde_json::Value) -> PathBuf {
        let path = dir.path().join("config.json");
        std::fs::write(&path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_load_fresh_config_has_no_session() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, serde_json::json!({ "privateKey": PK }));

        let store = ConfigStore::load(&path).unwrap();
        let config = store.config().unwrap();
        assert_eq!(config.private_key, PK);
        assert!(!config.session().is_authenticated());
    }

    #[test]
    fn test_load_accepts_camel_case_aliases() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            serde_json::json!({
                "privateKey": PK,
                "walletAddress": "0xabc",
                "bearerCredential": "jwt"
            }),
        );

        let session = ConfigStore::load(&path).unwrap().config().unwrap().session();
        assert_eq!(session, Session::new("0xabc", Some("jwt".to_string())));
    }

    #[test]
    fn test_save_session_preserves_key_and_unknown_fields() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            serde_json::json!({
                "privateKey": PK,
                "bearer_token": "old",
                "note": "keep me"
            }),
        );

        let store = ConfigStore::load(&path).unwrap();
        store
            .save_session(&Session::new("0xabc", Some("new".to_string())))
            .unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["privateKey"], PK);
        assert_eq!(written["wallet_address"], "0xabc");
        assert_eq!(written["bearer_token"], "new");
        assert_eq!(written["note"], "keep me");
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let err = ConfigStore::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = ConfigStore::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_blank_private_key_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, serde_json::json!({ "privateKey": "  " }));

        let err = ConfigStore::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::MissingPrivateKey { .. }));
    }
}
