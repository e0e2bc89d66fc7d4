//! Keyword heuristic estimating how far a piece of content spreads

const VIRAL_KEYWORDS: &[&str] = &[
    "breaking",
    "exclusive",
    "shocking",
    "amazing",
    "incredible",
    "unbelievable",
    "must see",
    "viral",
    "trending",
    "hot",
    "urgent",
    "alert",
    "warning",
    "scandal",
    "leaked",
];

const EMOTIONAL_KEYWORDS: &[&str] = &[
    "love",
    "hate",
    "angry",
    "excited",
    "scared",
    "surprised",
    "disgusted",
    "happy",
    "sad",
    "furious",
    "thrilled",
];

const BASE_SCORE: f64 = 0.3;

/// Estimate a popularity score in `[0, 1]` from the content text alone.
///
/// Base 0.3, +0.1 per viral keyword (max 0.3), +0.05 per emotional keyword
/// (max 0.2), plus 0.2 × a length score favouring 100–500 characters.
/// Keywords are matched as substrings of the lower-cased text.
pub fn estimate_popularity(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let hits = |keywords: &[&str]| keywords.iter().filter(|k| lower.contains(*k)).count();

    let viral_bonus = (hits(VIRAL_KEYWORDS) as f64 * 0.1).min(0.3);
    let emotional_bonus = (hits(EMOTIONAL_KEYWORDS) as f64 * 0.05).min(0.2);
    let length_bonus = length_score(text.chars().count()) * 0.2;

    (BASE_SCORE + viral_bonus + emotional_bonus + length_bonus).clamp(0.0, 1.0)
}

fn length_score(chars: usize) -> f64 {
    match chars {
        100..=500 => 0.8,
        50..=1000 => 0.6,
        n if n > 1000 => 0.4,
        _ => 0.5,
    }
}
