//! Verification request value object

use serde::{Deserialize, Serialize};

/// Kind of an auxiliary evidence block
///
/// Evidence is produced by collaborators outside the core (image analysis,
/// web search, ...) and arrives already rendered into text. The kind only
/// decides which section of the prompt the block lands in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceKind {
    /// Description of an image's content, text extracted from it
    ImageAnalysis,
    /// Result of a manipulation / AI-generation check on an image
    ManipulationCheck,
    /// Web search result used for fact-checking
    WebSearch,
    /// Reverse image search result
    ImageVerification,
    /// Anything else
    #[default]
    Other,
}

impl EvidenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceKind::ImageAnalysis => "image_analysis",
            EvidenceKind::ManipulationCheck => "manipulation_check",
            EvidenceKind::WebSearch => "web_search",
            EvidenceKind::ImageVerification => "image_verification",
            EvidenceKind::Other => "other",
        }
    }
}

impl std::fmt::Display for EvidenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EvidenceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "image_analysis" | "image" => Ok(EvidenceKind::ImageAnalysis),
            "manipulation_check" | "manipulation" => Ok(EvidenceKind::ManipulationCheck),
            "web_search" | "search" => Ok(EvidenceKind::WebSearch),
            "image_verification" => Ok(EvidenceKind::ImageVerification),
            "other" => Ok(EvidenceKind::Other),
            other => Err(format!(
                "Unknown evidence kind: {}. Valid: image_analysis, manipulation_check, web_search, image_verification, other",
                other
            )),
        }
    }
}

/// One block of auxiliary evidence, already rendered to text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceBlock {
    #[serde(default)]
    pub kind: EvidenceKind,
    pub text: String,
}

impl EvidenceBlock {
    pub fn new(kind: EvidenceKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Content to be verified by the judge panel (Value Object)
///
/// Created once per verification call and read-only afterwards. The URL is
/// used for logging and for the prompt; it is never fetched by the core.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationRequest {
    /// Target URL or identifier
    pub content_url: String,
    /// Free text of the content
    pub content_text: String,
    /// Image URLs attached to the content
    pub image_urls: Vec<String>,
    /// Auxiliary evidence blocks, in the order they were produced
    pub evidence: Vec<EvidenceBlock>,
}

impl VerificationRequest {
    /// Create a request for a piece of text
    pub fn new(content_text: impl Into<String>) -> Self {
        Self {
            content_text: content_text.into(),
            ..Self::default()
        }
    }

    /// Create a request identified only by its URL
    pub fn for_url(content_url: impl Into<String>) -> Self {
        Self {
            content_url: content_url.into(),
            ..Self::default()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.content_url = url.into();
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.content_text = text.into();
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_urls.push(url.into());
        self
    }

    pub fn with_evidence(mut self, block: EvidenceBlock) -> Self {
        self.evidence.push(block);
        self
    }

    /// True when there is nothing at all for a judge to look at
    pub fn is_empty(&self) -> bool {
        self.content_url.trim().is_empty()
            && self.content_text.trim().is_empty()
            && self.image_urls.is_empty()
            && self.evidence.iter().all(|e| e.text.trim().is_empty())
    }

    /// True when the request has a URL but no text of its own
    pub fn needs_content(&self) -> bool {
        self.content_text.trim().is_empty() && !self.content_url.trim().is_empty()
    }

    /// Label used in logs: the URL when present, otherwise a text excerpt
    pub fn target(&self) -> String {
        if !self.content_url.trim().is_empty() {
            self.content_url.clone()
        } else {
            crate::core::string::truncate(self.content_text.trim(), 60)
        }
    }

    /// Evidence blocks of one kind, in original order
    pub fn evidence_of(&self, kind: EvidenceKind) -> impl Iterator<Item = &EvidenceBlock> {
        self.evidence.iter().filter(move |e| e.kind == kind)
    }
}
