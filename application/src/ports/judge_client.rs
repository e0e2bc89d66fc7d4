//! Judge client port
//!
//! Defines the interface for asking one opinion source about a piece of content.

use async_trait::async_trait;
use thiserror::Error;
use veriquorum_domain::{JudgeId, JudgePrompt};

/// Errors a judge call can end with
///
/// None of these reach the caller of a verification: the judge task runner
/// turns each one into a failed opinion whose reason is the error text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JudgeError {
    #[error("timeout")]
    Timeout,

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Empty response from judge")]
    EmptyResponse,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// One opinion source
///
/// Implementations (adapters) live in the infrastructure layer. A call must
/// make a single attempt; retries, if any, are invisible to the core, which
/// budgets one attempt per deadline. Dropping the returned future is the
/// cancellation signal.
#[async_trait]
pub trait JudgeClient: Send + Sync {
    /// Identity reported on this judge's opinion
    fn judge_id(&self) -> &JudgeId;

    /// Ask the judge and return its raw UTF-8 answer
    async fn invoke(&self, prompt: &JudgePrompt) -> Result<String, JudgeError>;
}
