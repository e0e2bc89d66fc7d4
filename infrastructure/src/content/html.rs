//! Page text source backed by an HTTP GET
//!
//! HTML bodies are reduced to their readable text; anything else is passed
//! through as-is.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use veriquorum_application::{ContentSource, ContentSourceError};

/// Maximum response body size (5 MB)
const MAX_BODY_SIZE: usize = 5 * 1024 * 1024;

/// Default max extracted text size (20 KB)
pub const DEFAULT_MAX_TEXT: usize = 20 * 1024;

const USER_AGENT: &str = "Mozilla/5.0 (compatible; veriquorum/0.3)";

/// Fetches a page and extracts its readable text
pub struct HtmlContentSource {
    client: reqwest::Client,
}

impl HtmlContentSource {
    pub fn new(timeout: Duration) -> Result<Self, ContentSourceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ContentSourceError::FetchFailed(e.to_string()))?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContentSource for HtmlContentSource {
    async fn fetch(&self, url: &str) -> Result<String, ContentSourceError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ContentSourceError::FetchFailed(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContentSourceError::FetchFailed(format!(
                "HTTP error: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let content_length = response.content_length().unwrap_or(0);
        if content_length > MAX_BODY_SIZE as u64 {
            return Err(ContentSourceError::Unsupported(format!(
                "Response too large: {} bytes (max: {} bytes)",
                content_length, MAX_BODY_SIZE
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if content_type.starts_with("image/") || content_type.starts_with("video/") {
            return Err(ContentSourceError::Unsupported(content_type));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ContentSourceError::FetchFailed(format!("Failed to read body: {}", e)))?;
        if body.len() > MAX_BODY_SIZE {
            return Err(ContentSourceError::Unsupported(format!(
                "Response too large: {} bytes",
                body.len()
            )));
        }

        let body_str = String::from_utf8_lossy(&body);
        let text = if is_html(&content_type) {
            html_to_text(&body_str)
        } else {
            body_str.trim().to_string()
        };

        if text.is_empty() {
            return Err(ContentSourceError::Empty(url.to_string()));
        }

        debug!("{}", fetch_summary(url, &content_type, body.len(), &text));

        Ok(truncate_text(text, DEFAULT_MAX_TEXT))
    }
}

fn fetch_summary(url: &str, content_type: &str, body_bytes: usize, text: &str) -> String {
    format!(
        "Fetched {} ({}, {} bytes, {} chars of text)",
        url,
        content_type,
        body_bytes,
        text.chars().count()
    )
}

fn is_html(content_type: &str) -> bool {
    content_type.contains("text/html") || content_type.contains("application/xhtml")
}

fn truncate_text(mut text: String, max_len: usize) -> String {
    if text.len() > max_len {
        let cut = text.floor_char_boundary(max_len);
        text.truncate(cut);
        text.push_str("...");
    }
    text
}

/// Extract readable text from HTML, stripping tags, scripts, and styles
///
/// The page title, when present, is put first on its own line.
pub fn html_to_text(html: &str) -> String {
    use scraper::{Html, Selector};

    let document = Html::parse_document(html);

    // Tags whose entire subtree should be ignored
    let skip_tags = ["script", "style", "noscript", "svg", "nav", "footer", "head"];

    let title = Selector::parse("title")
        .ok()
        .and_then(|sel| document.select(&sel).next())
        .map(|t| t.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty());

    let body = Selector::parse("body")
        .ok()
        .and_then(|sel| document.select(&sel).next());

    let parts = match body {
        Some(body) => collect_element_text(body, &skip_tags),
        None => collect_element_text(document.root_element(), &skip_tags),
    };

    let body_text = clean_whitespace(&parts.join(" "));
    match title {
        Some(title) if !body_text.starts_with(&title) => format!("{}\n{}", title, body_text)
            .trim()
            .to_string(),
        _ => body_text,
    }
}

/// Recursively collect text from an element, skipping elements matching skip_tags
fn collect_element_text(element: scraper::ElementRef, skip_tags: &[&str]) -> Vec<String> {
    if skip_tags.contains(&element.value().name()) {
        return Vec::new();
    }

    let mut parts = Vec::new();

    for child in element.children() {
        match child.value() {
            scraper::Node::Text(text) => {
                let t = text.trim();
                if !t.is_empty() {
                    parts.push(t.to_string());
                }
            }
            scraper::Node::Element(_) => {
                if let Some(child_el) = scraper::ElementRef::wrap(child) {
                    parts.extend(collect_element_text(child_el, skip_tags));
                }
            }
            _ => {}
        }
    }

    parts
}

/// Collapse runs of whitespace to a single space
fn clean_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_to_text_basic() {
        let html = "<html><body><h1>Hello</h1><p>World</p></body></html>";
        assert_eq!(html_to_text(html), "Hello World");
    }

    #[test]
    fn test_html_to_text_puts_title_first() {
        let html = "<html><head><title>Breaking</title></head><body><p>Story</p></body></html>";
        assert_eq!(html_to_text(html), "Breaking\nStory");
    }

    #[test]
    fn test_html_to_text_strips_script_and_style() {
        let html = r#"
        <html><body>
            <script>var x = 1;</script>
            <style>.foo { color: red; }</style>
            <nav>Home | About</nav>
            <p>Visible text</p>
            <noscript>No JS</noscript>
        </body></html>
        "#;
        let text = html_to_text(html);
        assert!(text.contains("Visible text"));
        assert!(!text.contains("var x = 1"));
        assert!(!text.contains("color: red"));
        assert!(!text.contains("No JS"));
        assert!(!text.contains("About"));
    }

    #[test]
    fn test_html_to_text_empty() {
        assert!(html_to_text("").trim().is_empty());
    }

    #[test]
    fn test_clean_whitespace() {
        assert_eq!(clean_whitespace("  hello \n\t  world  "), "hello world");
    }

    #[test]
    fn test_truncate_text_respects_char_boundaries() {
        let text = "héllo wörld".to_string();
        let truncated = truncate_text(text, 2);
        assert_eq!(truncated, "h...");
        assert_eq!(truncate_text("short".to_string(), 10), "short");
    }

    #[test]
    fn test_is_html() {
        assert!(is_html("text/html; charset=utf-8"));
        assert!(is_html("application/xhtml+xml"));
        assert!(!is_html("application/json"));
    }

    #[test]
    fn test_fetch_summary_counts_chars_not_bytes() {
        let summary = fetch_summary("https://example.com", "text/html", 64, "café ümlaut");
        assert_eq!(
            summary,
            "Fetched https://example.com (text/html, 64 bytes, 11 chars of text)"
        );
    }
}
