//! Logging infrastructure: structured verification logging.
//!
//! Provides [`JsonlVerificationLogger`], a JSONL file writer that implements
//! the [`VerificationLogger`](veriquorum_application::VerificationLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlVerificationLogger;
