//! Configuration management
//!
//! Settings live in `settings.json` inside the data directory:
//! ```json
//! {
//!   "reservas": { "storage": "duckdb", "passwordScheme": "plain", "idAllocation": "maxPlusOne" }
//! }
//! ```
//! Fields this crate does not manage are preserved on save.
//!
//! `passwordScheme` only applies to passwords written after it changes.
//! Users stored as plain text cannot log in under `argon2`; they get a
//! `Credential` error until the scheme is set back or they re-register.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};
use crate::services::PasswordScheme;

/// Where the key-value records are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StorageBackend {
    /// `reservas.duckdb` in the data directory
    #[default]
    Duckdb,
    /// Process memory; nothing survives the process
    Memory,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StorageBackend::Duckdb => "duckdb",
            StorageBackend::Memory => "memory",
        })
    }
}

impl FromStr for StorageBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "duckdb" => Ok(StorageBackend::Duckdb),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(Error::Config(format!("unknown storage backend: {}", other))),
        }
    }
}

/// How record ids are handed out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IdAllocation {
    /// Highest existing id plus one
    #[default]
    MaxPlusOne,
    /// Atomic in-process sequence
    Sequence,
}

impl fmt::Display for IdAllocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IdAllocation::MaxPlusOne => "maxPlusOne",
            IdAllocation::Sequence => "sequence",
        })
    }
}

impl FromStr for IdAllocation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "maxplusone" | "max-plus-one" => Ok(IdAllocation::MaxPlusOne),
            "sequence" => Ok(IdAllocation::Sequence),
            other => Err(Error::Config(format!("unknown id allocation: {}", other))),
        }
    }
}

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    reservas: AppSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default)]
    storage: StorageBackend,
    #[serde(default)]
    password_scheme: PasswordScheme,
    #[serde(default)]
    id_allocation: IdAllocation,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Reservas configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub storage: StorageBackend,
    pub password_scheme: PasswordScheme,
    pub id_allocation: IdAllocation,
}

impl Config {
    /// Load config from the data directory
    ///
    /// `SR_STORAGE` and `SR_PASSWORD_SCHEME` override the file (for CI/testing).
    /// A malformed settings file falls back to defaults.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let settings_path = data_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        let storage = match std::env::var("SR_STORAGE") {
            Ok(value) => value.parse()?,
            Err(_) => raw.reservas.storage,
        };
        let password_scheme = match std::env::var("SR_PASSWORD_SCHEME") {
            Ok(value) => value.parse()?,
            Err(_) => raw.reservas.password_scheme,
        };

        Ok(Self {
            storage,
            password_scheme,
            id_allocation: raw.reservas.id_allocation,
        })
    }

    /// Save config to the data directory, keeping unmanaged fields
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let settings_path = data_dir.join("settings.json");

        let mut settings = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str::<SettingsFile>(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        settings.reservas.storage = self.storage;
        settings.reservas.password_scheme = self.password_scheme;
        settings.reservas.id_allocation = self.id_allocation;

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.id_allocation, IdAllocation::MaxPlusOne);
    }

    #[test]
    fn test_save_preserves_unknown_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"theme":"dark","reservas":{"idAllocation":"sequence","banner":true}}"#,
        )
        .unwrap();

        let mut config = Config::load(dir.path()).unwrap();
        assert_eq!(config.id_allocation, IdAllocation::Sequence);

        config.id_allocation = IdAllocation::MaxPlusOne;
        config.save(dir.path()).unwrap();

        let saved: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["theme"], "dark");
        assert_eq!(saved["reservas"]["banner"], true);
        assert_eq!(saved["reservas"]["idAllocation"], "maxPlusOne");
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), "{ not json").unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.id_allocation, IdAllocation::MaxPlusOne);
    }

    #[test]
    fn test_backend_parsing() {
        assert_eq!("memory".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
        assert_eq!("DuckDB".parse::<StorageBackend>().unwrap(), StorageBackend::Duckdb);
        assert!("redis".parse::<StorageBackend>().is_err());
        assert_eq!("max-plus-one".parse::<IdAllocation>().unwrap(), IdAllocation::MaxPlusOne);
        assert_eq!("Sequence".parse::<IdAllocation>().unwrap(), IdAllocation::Sequence);
        assert!("random".parse::<IdAllocation>().is_err());
    }

    #[test]
    fn test_save_writes_wire_names() {
        let dir = tempdir().unwrap();
        let config = Config {
            storage: StorageBackend::Memory,
            password_scheme: PasswordScheme::Argon2,
            id_allocation: IdAllocation::Sequence,
        };
        config.save(dir.path()).unwrap();

        let saved: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("settings.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(saved["reservas"]["storage"], config.storage.to_string());
        assert_eq!(saved["reservas"]["idAllocation"], config.id_allocation.to_string());
        assert_eq!(saved["reservas"]["passwordScheme"], "argon2");
    }
}
