//! Configuration file loading for veriquorum
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables `VERIQUORUM_<SECTION>__<KEY>`
//! 2. `--config <path>` specified file
//! 3. Project root: `./veriquorum.toml` or `./.veriquorum.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/veriquorum/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, FileConfig, FileDispatchConfig,
    FileJudgesConfig, FileLoggingConfig, FileOutputConfig, FileProviderConfig,
};
pub use loader::ConfigLoader;
