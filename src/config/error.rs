//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Preset name outside the shipped table.
    #[error("invalid preset '{value}': expected one of balanced, naturalness, reference, strict, broad")]
    InvalidPreset { value: String },

    /// Batch size string could not be parsed as a number.
    #[error("failed to parse batch size '{value}': {source}")]
    BatchSizeParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Batch size parsed but is zero.
    #[error("invalid batch size '{value}': must be at least 1")]
    InvalidBatchSize { value: String },
}
