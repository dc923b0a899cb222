//! Configuration system
//!
//! Pipeline settings load from `.toml` or `.ron` files through the
//! [`Config`] trait. Every field has a default, so a file only needs to
//! name what it changes.

use crate::codec::ByteOrder;
pub use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match ConfigFormat::from_path(path)? {
            ConfigFormat::Toml => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            ConfigFormat::Ron => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match ConfigFormat::from_path(path)? {
            ConfigFormat::Toml => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            ConfigFormat::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Values that load fine but cannot work together
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Toml,
    Ron,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Binary codec settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Byte order of scene files read and written by the pipeline
    pub byte_order: ByteOrder,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            byte_order: ByteOrder::Little,
        }
    }
}

/// GPU buffer settings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    /// Always emit 32-bit indices
    pub force_index32: bool,
}

/// # Pipeline Configuration
///
/// Top-level settings for one producer-to-consumer run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Default log filter, overridden by `RUST_LOG`
    pub log_level: String,
    /// Run scene validation before the consumer
    pub validate: bool,
    /// Log a scene summary before the consumer
    pub dump: bool,
    /// Where the consumer writes its artifact
    pub output_path: Option<PathBuf>,
    /// Codec settings
    pub codec: CodecConfig,
    /// Buffer builder settings
    pub buffers: BufferConfig,
}

impl PipelineConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            validate: true,
            dump: false,
            output_path: None,
            codec: CodecConfig::default(),
            buffers: BufferConfig::default(),
        }
    }

    /// Set the default log filter
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set the codec byte order
    #[must_use]
    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.codec.byte_order = byte_order;
        self
    }

    /// Force 32-bit index buffers
    #[must_use]
    pub fn with_force_index32(mut self, force: bool) -> Self {
        self.buffers.force_index32 = force;
        self
    }

    /// Enable or disable validation
    #[must_use]
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate = enabled;
        self
    }

    /// Enable or disable the scene summary
    #[must_use]
    pub fn with_dump(mut self, enabled: bool) -> Self {
        self.dump = enabled;
        self
    }

    /// Set the output path
    #[must_use]
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        const LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];
        if !LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::Invalid(format!("unknown log level \"{}\"", self.log_level)));
        }
        if self.output_path.as_ref().is_some_and(|path| path.as_os_str().is_empty()) {
            return Err(ConfigError::Invalid("output path is empty".to_string()));
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for PipelineConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("asset_pipeline_{}_{name}", std::process::id()))
    }

    #[test]
    fn test_toml_round_trip() {
        let path = temp_path("config.toml");
        let config = PipelineConfig::new()
            .with_byte_order(ByteOrder::Big)
            .with_force_index32(true)
            .with_output_path("scene.bin");

        config.save_to_file(&path).unwrap();
        let loaded = PipelineConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_ron_round_trip() {
        let path = temp_path("config.ron");
        let config = PipelineConfig::new().with_dump(true).with_log_level("debug");

        config.save_to_file(&path).unwrap();
        let loaded = PipelineConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: PipelineConfig = toml::from_str("dump = true\n[codec]\nbyte_order = \"Big\"\n").unwrap();
        assert!(config.dump);
        assert!(config.validate);
        assert_eq!(config.codec.byte_order, ByteOrder::Big);
        assert!(!config.buffers.force_index32);
    }

    #[test]
    fn test_unsupported_extension() {
        let result = PipelineConfig::new().save_to_file("pipeline.yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_validate() {
        assert!(PipelineConfig::new().validate().is_ok());
        assert!(PipelineConfig::new().with_log_level("loud").validate().is_err());
        assert!(PipelineConfig::new().with_output_path("").validate().is_err());
    }
}
