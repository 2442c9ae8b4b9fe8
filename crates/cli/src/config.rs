//! Runtime configuration.
//!
//! The only setting is the Gemini API key, read once at startup from the
//! environment or a `.env` file.

use secrecy::SecretString;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Deck analyzed when no input path is given, relative to the executable's directory.
const DEFAULT_INPUT: &str = "../presentations/NoogatAssignment.pptx";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The API key is absent or blank.
    #[error("{0} not found. Please add your API key to the .env file.")]
    MissingCredential(&'static str),
}

/// Settings needed to call the analysis service.
#[derive(Debug)]
pub struct Config {
    api_key: SecretString,
}

impl Config {
    /// Load configuration, reading a `.env` file first if one is present.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenv::dotenv() {
            log::debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup(API_KEY_VAR)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingCredential(API_KEY_VAR))?;

        Ok(Self {
            api_key: SecretString::new(api_key),
        })
    }

    /// Consume the configuration, keeping only the API key.
    pub fn into_api_key(self) -> SecretString {
        self.api_key
    }
}

/// `presentations/NoogatAssignment.pptx` next to the directory holding the executable.
pub fn default_input_path() -> PathBuf {
    match std::env::current_exe() {
        Ok(exe) => exe
            .parent()
            .map(|dir| dir.join(DEFAULT_INPUT))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT)),
        Err(e) => {
            log::warn!("Could not locate executable ({}), using relative default path", e);
            PathBuf::from(DEFAULT_INPUT)
        }
    }
}
