//! Prompt templates for the verification flow

use crate::core::request::{EvidenceKind, VerificationRequest};
use serde::{Deserialize, Serialize};

/// Web search results passed to judges
const MAX_WEB_SEARCH_RESULTS: usize = 5;

/// Reverse image search results passed to judges
const MAX_IMAGE_VERIFICATIONS: usize = 3;

/// The prompt every judge of one verification receives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgePrompt {
    pub system: String,
    pub user: String,
}

impl JudgePrompt {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }

    /// Build the standard verification prompt for a request
    pub fn for_request(request: &VerificationRequest) -> Self {
        Self::new(
            PromptTemplate::verification_system(),
            PromptTemplate::verification_prompt(request),
        )
    }
}

/// Templates for generating prompts
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for content verification
    pub fn verification_system() -> &'static str {
        r#"You are an AI content verification expert. Analyze the given content and determine if it's authentic, fake, or uncertain.

Your analysis should cover:
1. Factual accuracy and logical consistency
2. Source credibility and attribution
3. Context and timing relevance
4. Potential manipulation indicators (including image manipulation)
5. Overall authenticity assessment
6. Image content analysis and text extraction results
7. Any signs of AI-generated or manipulated content
8. Web search results and fact-checking information
9. Cross-reference claims with available online sources
10. Consider the reliability and relevance of search results

IMPORTANT: You MUST respond with ONLY valid JSON in this exact format:
{
    "decision": "authentic",
    "confidence": 0.8,
    "reasoning": "Your detailed analysis here",
    "evidence": ["evidence1", "evidence2"]
}

Valid decision values: "authentic", "fake", "uncertain"
Confidence must be a number between 0.0 and 1.0
Do not include any text outside the JSON object."#
    }

    /// User prompt describing the content and all gathered evidence
    pub fn verification_prompt(request: &VerificationRequest) -> String {
        let images = if request.image_urls.is_empty() {
            "None".to_string()
        } else {
            request.image_urls.join(", ")
        };

        let mut prompt = format!(
            "Content to verify:\nURL: {}\nText: {}\nImages: {}",
            request.content_url, request.content_text, images
        );

        let sections = [
            (EvidenceKind::ImageAnalysis, "Image Analysis Results", "Image", None),
            (
                EvidenceKind::ManipulationCheck,
                "Manipulation Detection Results",
                "Image",
                None,
            ),
            (
                EvidenceKind::WebSearch,
                "Web Search Results for Fact-Checking",
                "Result",
                Some(MAX_WEB_SEARCH_RESULTS),
            ),
            (
                EvidenceKind::ImageVerification,
                "Image Verification Search Results",
                "Image Verification",
                Some(MAX_IMAGE_VERIFICATIONS),
            ),
            (EvidenceKind::Other, "Additional Evidence", "Evidence", None),
        ];

        for (kind, heading, label, limit) in sections {
            let blocks: Vec<_> = request
                .evidence_of(kind)
                .filter(|b| !b.text.trim().is_empty())
                .take(limit.unwrap_or(usize::MAX))
                .collect();
            if blocks.is_empty() {
                continue;
            }
            prompt.push_str(&format!("\n\n[{}:]\n", heading));
            for (i, block) in blocks.iter().enumerate() {
                prompt.push_str(&format!("{} {}: {}\n", label, i + 1, block.text.trim()));
            }
        }

        prompt.push_str(
            "\n\nAnalyze this content and respond with ONLY the JSON format specified above.",
        );
        prompt
    }
}
