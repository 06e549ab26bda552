//! Configuration management for Ladder

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use crate::board::NameValidator;
use crate::error::BoardError;

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LadderConfig {
    /// Where board records are kept
    pub storage: StorageConfig,
    /// Rules for player names
    pub names: NameRules,
}

/// Storage-related configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one record file per board
    pub data_dir: PathBuf,
    /// File extension of board records
    pub extension: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            extension: "board".to_string(),
        }
    }
}

/// Player name rules
///
/// The defaults only reject blank names; the length cap and pattern are opt-in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRules {
    /// Maximum name length in characters, if capped
    #[serde(default)]
    pub max_length: Option<usize>,
    /// Regex every name must match, if set
    #[serde(default)]
    pub allowed_pattern: Option<String>,
}

impl LadderConfig {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, BoardError> {
        let content = fs::read_to_string(path).map_err(|e| {
            BoardError::Configuration {
                message: format!("Failed to read config file: {}", e),
                field: "config_file".to_string(),
            }
        })?;

        let config: LadderConfig = toml::from_str(&content).map_err(|e| {
            BoardError::Configuration {
                message: format!("Failed to parse config file: {}", e),
                field: "config_format".to_string(),
            }
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), BoardError> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            BoardError::Configuration {
                message: format!("Failed to serialize config: {}", e),
                field: "config_serialization".to_string(),
            }
        })?;

        fs::write(path, content).map_err(|e| {
            BoardError::Configuration {
                message: format!("Failed to write config file: {}", e),
                field: "config_write".to_string(),
            }
        })?;

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), BoardError> {
        let extension = self.storage.extension.as_str();
        if extension.is_empty() || extension.contains(|c: char| matches!(c, '.' | '/' | '\\')) {
            return Err(BoardError::Configuration {
                message: format!("Invalid record extension {:?}", extension),
                field: "storage.extension".to_string(),
            });
        }

        // Compiling the validator checks the name rules
        NameValidator::new(&self.names)?;

        Ok(())
    }

    /// Create a development configuration keeping boards in a scratch directory
    pub fn development() -> Self {
        Self {
            storage: StorageConfig {
                data_dir: std::env::temp_dir().join("ladder-boards"),
                ..Default::default()
            },
            names: NameRules {
                max_length: Some(16),
                allowed_pattern: Some(r"^[A-Za-z0-9 _-]+$".to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;
    use std::io::Write;

    #[test]
    fn test_default_config_validation() {
        let config = LadderConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.storage.extension, "board");
    }

    #[test]
    fn test_development_config_validation() {
        let config = LadderConfig::development();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_extension() {
        let mut config = LadderConfig::default();
        config.storage.extension = "tar.gz".to_string();
        assert!(config.validate().is_err());

        config.storage.extension = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_name_rules_are_uncapped() {
        let rules = LadderConfig::default().names;
        assert_eq!(rules.max_length, None);
        assert_eq!(rules.allowed_pattern, None);
    }

    #[test]
    fn test_zero_name_length() {
        let mut config = LadderConfig::default();
        config.names.max_length = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_name_pattern() {
        let mut config = LadderConfig::default();
        config.names.allowed_pattern = Some("[unclosed".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_roundtrip() {
        let original_config = LadderConfig::development();

        let temp_file = NamedTempFile::new().unwrap();
        let temp_path = temp_file.path();

        assert!(original_config.to_file(temp_path).is_ok());

        let loaded_config = LadderConfig::from_file(temp_path).unwrap();
        assert_eq!(original_config, loaded_config);
    }

    #[test]
    fn test_partial_file_is_rejected() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[storage]\ndata_dir = \"boards\"").unwrap();

        let err = LadderConfig::from_file(temp_file.path()).unwrap_err();
        assert!(matches!(err, BoardError::Configuration { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = LadderConfig::from_file("/definitely/not/here/ladder.toml").unwrap_err();
        match err {
            BoardError::Configuration { field, .. } => assert_eq!(field, "config_file"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
