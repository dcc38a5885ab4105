use crate::domain::constants::{API_KEY_ENV, DEFAULT_API_URL};
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// API credential. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("`{0}` environmental variable missing.  Please set key and try again")]
    MissingApiKey(&'static str),
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Optional `$HOME/.config/ecrime/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api_url: Option<String>,
}

#[derive(Debug)]
pub struct Config {
    pub api_url: String,
    pub api_key: ApiKey,
}

impl Config {
    /// Credential first: without it nothing else is worth reading.
    pub fn load(api_url_flag: Option<&str>) -> Result<Self, ConfigError> {
        let api_key = parse_api_key(std::env::var(API_KEY_ENV).ok())?;
        let file = load_file_config()?;
        Ok(Self::resolve(api_url_flag, file, api_key))
    }

    /// Flag/env beats the config file, which beats the built-in default.
    pub fn resolve(api_url_flag: Option<&str>, file: FileConfig, api_key: ApiKey) -> Self {
        let given = |u: &String| !u.trim().is_empty();
        let api_url = api_url_flag
            .map(str::to_string)
            .filter(given)
            .or(file.api_url.filter(given))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self { api_url, api_key }
    }
}

pub fn parse_api_key(raw: Option<String>) -> Result<ApiKey, ConfigError> {
    match raw {
        Some(k) if !k.trim().is_empty() => Ok(ApiKey::new(k.trim())),
        _ => Err(ConfigError::MissingApiKey(API_KEY_ENV)),
    }
}

pub fn config_path() -> Option<PathBuf> {
    let home = std::env::var("HOME").ok()?;
    Some(PathBuf::from(home).join(".config/ecrime/config.toml"))
}

pub fn load_file_config() -> Result<FileConfig, ConfigError> {
    let Some(path) = config_path() else {
        return Ok(FileConfig::default());
    };
    if !path.exists() {
        return Ok(FileConfig::default());
    }
    let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse { path, source })
}
