//! Configuration management for the transform tooling
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (omt.toml)
//! - Environment variables (OMT__*)
//!
//! ## Example config file (omt.toml):
//! ```toml
//! [limits]
//! max_depth = 64
//!
//! [output]
//! format = "compact"
//! model_tag = "$type"
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::engine::{TransformOptions, DEFAULT_MAX_DEPTH};
use crate::value::DEFAULT_MODEL_TAG;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapperConfig {
    /// Traversal limits
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Traversal limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Deepest include level evaluated before a transform is aborted
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format (pretty or compact)
    #[serde(default)]
    pub format: OutputFormat,

    /// Key holding the model name of serialized instances
    #[serde(default = "default_model_tag")]
    pub model_tag: String,
}

/// Output format for JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_model_tag() -> String {
    DEFAULT_MODEL_TAG.to_string()
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Pretty,
            model_tag: default_model_tag(),
        }
    }
}

impl MapperConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, layering an explicit file over the default locations
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = ["omt.toml", ".omt.toml", "config/omt.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "familiar", "omt") {
            let xdg_config = config_dir.config_dir().join("omt.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("OMT")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        std::fs::write(path, self.to_toml()?)
    }

    /// Render as TOML
    pub fn to_toml(&self) -> std::io::Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Options for transform calls
    pub fn transform_options(&self) -> TransformOptions {
        TransformOptions {
            max_depth: self.limits.max_depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MapperConfig::default();
        assert_eq!(config.limits.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.output.format, OutputFormat::Pretty);
        assert_eq!(config.output.model_tag, "$model");
    }

    #[test]
    fn test_serialize_config() {
        let toml_str = MapperConfig::default().to_toml().unwrap();
        assert!(toml_str.contains("[limits]"));
        assert!(toml_str.contains("[output]"));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[limits]\nmax_depth = 7\n\n[output]\nformat = \"compact\"\n").unwrap();

        let config = MapperConfig::load_from(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.transform_options().max_depth, 7);
        assert_eq!(config.output.format, OutputFormat::Compact);
        assert_eq!(config.output.model_tag, "$model");
    }

    #[test]
    fn test_save_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.toml");
        let mut config = MapperConfig::default();
        config.output.model_tag = "$type".to_string();
        config.save(path.to_str().unwrap()).unwrap();

        let loaded = MapperConfig::load_from(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(loaded.output.model_tag, "$type");
    }
}
