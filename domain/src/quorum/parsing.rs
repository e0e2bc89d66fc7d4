//! Judge response parsing for verification.
//!
//! Converts raw judge text into an [`Opinion`]. Judges are asked for a JSON
//! object but routinely wrap it in prose or markdown, or ignore the format
//! entirely, so parsing degrades through three tiers:
//!
//! | Tier | Function | Input accepted |
//! |------|----------|----------------|
//! | 1 | [`parse_strict`] | Whole text is a JSON object (code fences stripped) |
//! | 2 | [`parse_fragment`] | First balanced `{...}` span in the text |
//! | 3 | [`classify_text`] | Anything: keyword classification |
//!
//! All tiers are pure and deterministic.

use super::decision::Decision;
use super::opinion::Opinion;
use crate::core::judge::JudgeId;
use crate::core::string::prefix;
use serde_json::{Map, Value};

/// Confidence assigned when a judge's confidence is missing its mark
pub const COERCED_CONFIDENCE: f64 = 0.5;

/// Confidence of a keyword-classified authentic/fake answer
pub const KEYWORD_CONFIDENCE: f64 = 0.6;

/// Confidence of a keyword-classified answer with no decisive vocabulary
pub const NO_KEYWORD_CONFIDENCE: f64 = 0.3;

/// Bytes of raw text echoed into the reasoning of a tier-3 opinion
const ECHO_BYTES: usize = 200;

const AUTHENTIC_WORDS: &[&str] = &["authentic", "genuine", "real"];
const FAKE_WORDS: &[&str] = &["fake", "false", "misleading"];

/// Which parsing tier produced an opinion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseTier {
    Strict,
    Fragment,
    Heuristic,
}

impl ParseTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseTier::Strict => "strict",
            ParseTier::Fragment => "fragment",
            ParseTier::Heuristic => "heuristic",
        }
    }
}

impl std::fmt::Display for ParseTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse a judge response, trying each tier in order.
///
/// Never fails: text no tier can structure still yields a low-confidence
/// keyword classification.
pub fn parse_opinion(judge_id: &JudgeId, raw: &str) -> Opinion {
    parse_opinion_with_tier(judge_id, raw).0
}

/// Like [`parse_opinion`], also reporting which tier succeeded.
pub fn parse_opinion_with_tier(judge_id: &JudgeId, raw: &str) -> (Opinion, ParseTier) {
    if let Some(opinion) = parse_strict(judge_id, raw) {
        return (opinion, ParseTier::Strict);
    }
    if let Some(opinion) = parse_fragment(judge_id, raw) {
        return (opinion, ParseTier::Fragment);
    }
    (classify_text(judge_id, raw), ParseTier::Heuristic)
}

/// Tier 1: the whole response is a JSON object.
///
/// Leading ```` ```json ```` / ```` ``` ```` and trailing ```` ``` ```` markers
/// are stripped first. `decision`, `confidence` and `reasoning` must be present.
/// An unknown decision becomes `uncertain`; a non-numeric or out-of-range
/// confidence becomes [`COERCED_CONFIDENCE`]; `evidence` defaults to empty.
pub fn parse_strict(judge_id: &JudgeId, raw: &str) -> Option<Opinion> {
    let cleaned = strip_code_fences(raw);
    let value: Value = serde_json::from_str(cleaned).ok()?;
    opinion_from_object(judge_id, value.as_object()?)
}

/// Tier 2: strict parse of the first balanced `{...}` span in the text.
pub fn parse_fragment(judge_id: &JudgeId, raw: &str) -> Option<Opinion> {
    let fragment = extract_json_fragment(raw)?;
    parse_strict(judge_id, fragment)
}

/// Tier 3: keyword classification of unstructured text.
///
/// Authentic vocabulary is checked before fake vocabulary. Matching is by
/// substring, so inflected forms ("faked", "really") count.
pub fn classify_text(judge_id: &JudgeId, raw: &str) -> Opinion {
    let lower = raw.to_lowercase();
    let mentions = |vocab: &[&str]| vocab.iter().any(|word| lower.contains(word));

    let (decision, confidence) = if mentions(AUTHENTIC_WORDS) {
        (Decision::Authentic, KEYWORD_CONFIDENCE)
    } else if mentions(FAKE_WORDS) {
        (Decision::Fake, KEYWORD_CONFIDENCE)
    } else {
        (Decision::Uncertain, NO_KEYWORD_CONFIDENCE)
    };

    Opinion::new(
        judge_id.clone(),
        decision,
        confidence,
        format!(
            "Parsed from unstructured response: {}...",
            prefix(raw.trim(), ECHO_BYTES)
        ),
    )
}

/// Remove markdown code fences around a response
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// Find the first balanced `{...}` span, honouring JSON string literals.
///
/// Returns `None` when there is no `{` or the first one is never closed.
pub fn extract_json_fragment(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

fn opinion_from_object(judge_id: &JudgeId, obj: &Map<String, Value>) -> Option<Opinion> {
    let decision = obj.get("decision")?;
    let confidence = obj.get("confidence")?;
    let reasoning = obj.get("reasoning")?;

    let decision = decision
        .as_str()
        .map(Decision::from_label)
        .unwrap_or(Decision::Uncertain);

    let confidence = confidence
        .as_f64()
        .filter(|c| (0.0..=1.0).contains(c))
        .unwrap_or(COERCED_CONFIDENCE);

    let evidence = match obj.get("evidence") {
        Some(Value::Array(items)) => items.iter().map(value_to_text).collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.clone()],
        _ => Vec::new(),
    };

    Some(
        Opinion::new(judge_id.clone(), decision, confidence, value_to_text(reasoning))
            .with_evidence(evidence),
    )
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
