use std::path::PathBuf;

use crate::error::ConfigError;

pub const STORE_URL_VAR: &str = "PAVILION_STORE_URL";
pub const STORE_KEY_VAR: &str = "PAVILION_STORE_KEY";
pub const STORE_TIMEOUT_VAR: &str = "PAVILION_STORE_TIMEOUT_SECS";
pub const DB_PATH_VAR: &str = "PAVILION_DB_PATH";
pub const SEED_FILE_VAR: &str = "PAVILION_SEED_FILE";

pub const DEFAULT_DB_PATH: &str = "pavilions.db";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Which table store the server talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    /// Hosted table store reached over HTTP.
    Remote {
        base_url: String,
        api_key: String,
        timeout_secs: u64,
    },
    /// Local SQLite file, for development without a hosted store.
    Local {
        db_path: String,
        seed_file: Option<PathBuf>,
    },
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let Some(base_url) = get(STORE_URL_VAR) else {
            return Ok(StoreConfig::Local {
                db_path: get(DB_PATH_VAR).unwrap_or_else(|| DEFAULT_DB_PATH.to_string()),
                seed_file: get(SEED_FILE_VAR).map(PathBuf::from),
            });
        };

        let api_key = get(STORE_KEY_VAR).ok_or(ConfigError::MissingKey(STORE_URL_VAR, STORE_KEY_VAR))?;
        let timeout_secs = match get(STORE_TIMEOUT_VAR) {
            None => DEFAULT_TIMEOUT_SECS,
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        name: STORE_TIMEOUT_VAR,
                        value,
                    })
                }
            },
        };

        Ok(StoreConfig::Remote {
            base_url,
            api_key,
            timeout_secs,
        })
    }
}
