//! Content source port
//!
//! Fetches the text of a page when a request arrives with only a URL.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentSourceError {
    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    #[error("Unsupported content: {0}")]
    Unsupported(String),

    #[error("No readable content at {0}")]
    Empty(String),
}

/// Source of page text for URL-only requests
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, ContentSourceError>;
}
