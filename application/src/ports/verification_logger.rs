//! Port for structured verification logging.
//!
//! Defines the [`VerificationLogger`] trait for recording every opinion and
//! verdict to a machine-readable audit log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the full
//! record of what each judge said and how the panel decided.

use serde_json::Value;

/// Event type for one judge's opinion
pub const EVENT_JUDGE_OPINION: &str = "judge_opinion";

/// Event type for the aggregated verdict
pub const EVENT_VERDICT: &str = "verdict";

/// A structured verification event for logging.
pub struct VerificationEvent {
    /// Event type identifier (e.g., "judge_opinion", "verdict").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl VerificationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging verification events to a structured log.
///
/// The `log` method is synchronous and non-fallible so that logging can
/// never change the outcome of a verification.
pub trait VerificationLogger: Send + Sync {
    fn log(&self, event: VerificationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoVerificationLogger;

impl VerificationLogger for NoVerificationLogger {
    fn log(&self, _event: VerificationEvent) {}
}
