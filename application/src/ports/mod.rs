//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod content_source;
pub mod judge_client;
pub mod progress;
pub mod verification_logger;
