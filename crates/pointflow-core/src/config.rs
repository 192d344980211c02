//! Module: config
//! Responsibility: TOML-backed settings for composite stages.

use crate::error::{ErrorClass, ErrorOrigin, StageError};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

/// Identifier reported by every composite stage unless configured otherwise.
pub const DEFAULT_MOSAIC_NAME: &str = "Mosaic Filter";

/// Points requested per read by the draining helpers.
pub const DEFAULT_READ_CHUNK_SIZE: usize = 4096;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid config toml: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid mosaic config: {0}")]
    Invalid(String),
}

impl From<ConfigError> for StageError {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorClass::Config, ErrorOrigin::Config, err.to_string())
    }
}

///
/// MosaicConfig
///
/// Settings applied when a composite stage is built.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct MosaicConfig {
    pub name: String,
    pub read_chunk_size: usize,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_MOSAIC_NAME.to_string(),
            read_chunk_size: DEFAULT_READ_CHUNK_SIZE,
        }
    }
}

impl MosaicConfig {
    /// Parse a document with an optional `[mosaic]` table.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let document: ConfigDocument = toml::from_str(source)?;
        document.mosaic.validate()?;

        Ok(document.mosaic)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid("name must not be empty".to_string()));
        }
        if self.read_chunk_size == 0 {
            return Err(ConfigError::Invalid(
                "read_chunk_size must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigDocument {
    mosaic: MosaicConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = MosaicConfig::from_toml_str("").expect("empty toml should parse");

        assert_eq!(config, MosaicConfig::default());
        assert_eq!(config.name, DEFAULT_MOSAIC_NAME);
    }

    #[test]
    fn mosaic_table_overrides_fields() {
        let config = MosaicConfig::from_toml_str(
            r#"
            [mosaic]
            name = "Tile Mosaic"
            read_chunk_size = 256
            "#,
        )
        .expect("mosaic table should parse");

        assert_eq!(config.name, "Tile Mosaic");
        assert_eq!(config.read_chunk_size, 256);
    }

    #[test]
    fn partial_table_keeps_remaining_defaults() {
        let config = MosaicConfig::from_toml_str("[mosaic]\nread_chunk_size = 8\n")
            .expect("partial table should parse");

        assert_eq!(config.name, DEFAULT_MOSAIC_NAME);
        assert_eq!(config.read_chunk_size, 8);
    }

    #[test]
    fn zero_chunk_size_is_rejected() {
        let err = MosaicConfig::from_toml_str("[mosaic]\nread_chunk_size = 0\n")
            .expect_err("zero chunk size must fail validation");

        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = MosaicConfig::from_toml_str("[mosaic]\nchunk = 8\n")
            .expect_err("unknown key must fail parsing");

        assert!(matches!(err, ConfigError::Parse(_)));

        let stage_err: StageError = err.into();
        assert_eq!(stage_err.class, ErrorClass::Config);
        assert_eq!(stage_err.origin, ErrorOrigin::Config);
    }
}
