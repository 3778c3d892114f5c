//! Configuration type definitions

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::emitter::DEFAULT_SUFFIX;
use crate::error::ValidgenResult;
use crate::render::RenderConfig;

use super::loader::{self, ConfigWarning};

/// Generation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Struct-tag key holding the constraints
    #[serde(default = "default_tag")]
    pub tag: String,

    /// Name of the generated method
    #[serde(default = "default_method")]
    pub method: String,

    /// Appended to the source stem to form the default output file name
    #[serde(default = "default_suffix")]
    pub suffix: String,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            tag: default_tag(),
            method: default_method(),
            suffix: default_suffix(),
        }
    }
}

fn default_tag() -> String {
    "arg".to_string()
}

fn default_method() -> String {
    RenderConfig::default().method_name
}

fn default_suffix() -> String {
    DEFAULT_SUFFIX.to_string()
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub verbosity: Verbosity,
}

/// Verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    /// Lenient parse used for environment overrides; unknown values are `Normal`
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "quiet" => Verbosity::Quiet,
            "verbose" => Verbosity::Verbose,
            "debug" => Verbosity::Debug,
            _ => Verbosity::Normal,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub generate: GenerateConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> ValidgenResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> ValidgenResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from explicit, project or user config, then apply env overrides
    pub fn load_or_default(
        explicit: Option<&Path>,
        source_dir: Option<&Path>,
    ) -> ValidgenResult<(Self, Vec<ConfigWarning>)> {
        loader::load_or_default(explicit, source_dir)
    }

    /// Apply environment variable overrides (VALIDGEN_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Rendering parameters derived from this configuration
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            method_name: self.generate.method.clone(),
        }
    }
}
