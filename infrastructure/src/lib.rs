//! Infrastructure layer for veriquorum
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod content;
pub mod judges;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileJudgesConfig, FileOutputConfig,
    FileProviderConfig,
};
pub use content::HtmlContentSource;
pub use judges::{ChatCompletionsJudge, JudgePanel, JudgePanelError};
pub use logging::JsonlVerificationLogger;
