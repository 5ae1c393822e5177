//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `ATTUNE_*` environment
//! variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::path::PathBuf;

use crate::constants::{DEFAULT_BATCH_SIZE, DEFAULT_LANGUAGE};
use crate::scoring::PresetName;

/// Tool configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `ATTUNE_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory with the sentence-encoder files (`config.json`,
    /// `model.safetensors`, `tokenizer.json`). `None` means stub embeddings.
    pub model_dir: Option<PathBuf>,

    /// Reference-set language code. Default: `en`.
    pub language: String,

    /// Scoring preset. Default: `balanced`.
    pub preset: PresetName,

    /// Texts embedded per batch. Default: `10`.
    pub batch_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_dir: None,
            language: DEFAULT_LANGUAGE.to_string(),
            preset: PresetName::Balanced,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl Config {
    const ENV_MODEL_DIR: &'static str = "ATTUNE_MODEL_DIR";
    const ENV_LANGUAGE: &'static str = "ATTUNE_LANG";
    const ENV_PRESET: &'static str = "ATTUNE_PRESET";
    const ENV_BATCH_SIZE: &'static str = "ATTUNE_BATCH_SIZE";

    /// Loads configuration from environment variables (falling back to
    /// defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let model_dir = Self::parse_optional_path_from_env(Self::ENV_MODEL_DIR);
        let language = Self::parse_string_from_env(Self::ENV_LANGUAGE, defaults.language);
        let preset = Self::parse_preset_from_env(defaults.preset)?;
        let batch_size = Self::parse_batch_size_from_env(defaults.batch_size)?;

        Ok(Self {
            model_dir,
            language,
            preset,
            batch_size,
        })
    }

    fn env_value(name: &'static str) -> Option<String> {
        env::var(name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_optional_path_from_env(name: &'static str) -> Option<PathBuf> {
        Self::env_value(name).map(PathBuf::from)
    }

    fn parse_string_from_env(name: &'static str, default: String) -> String {
        Self::env_value(name).unwrap_or(default)
    }

    fn parse_preset_from_env(default: PresetName) -> Result<PresetName, ConfigError> {
        match Self::env_value(Self::ENV_PRESET) {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidPreset { value }),
            None => Ok(default),
        }
    }

    fn parse_batch_size_from_env(default: usize) -> Result<usize, ConfigError> {
        match Self::env_value(Self::ENV_BATCH_SIZE) {
            Some(value) => {
                let parsed: usize =
                    value
                        .parse()
                        .map_err(|source| ConfigError::BatchSizeParseError {
                            value: value.clone(),
                            source,
                        })?;
                if parsed == 0 {
                    return Err(ConfigError::InvalidBatchSize { value });
                }
                Ok(parsed)
            }
            None => Ok(default),
        }
    }
}
