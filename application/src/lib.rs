//! Application layer for veriquorum
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::VerificationParams;
pub use ports::{
    content_source::{ContentSource, ContentSourceError},
    judge_client::{JudgeClient, JudgeError},
    progress::{NoProgress, ProgressNotifier},
    verification_logger::{NoVerificationLogger, VerificationEvent, VerificationLogger},
};
pub use use_cases::fan_out::FanOutScheduler;
pub use use_cases::run_judge::JudgeTaskRunner;
pub use use_cases::verify_content::{
    VerificationOutcome, VerifyContentInput, VerifyContentUseCase, VerifyError,
};
