//! Configuration module for validgen
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (VALIDGEN_*)
//! 3. Explicit `--config` file, or `validgen.toml` next to the source file
//! 4. User config (<config_dir>/validgen/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
#[cfg(test)]
mod tests;
mod types;

pub use loader::{ConfigWarning, PROJECT_CONFIG_FILE};
pub use types::{Config, GenerateConfig, OutputConfig, Verbosity};
