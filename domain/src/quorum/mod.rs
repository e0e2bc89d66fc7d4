//! Verification consensus domain
//!
//! Core concepts for turning many unreliable judges into one verdict.
//!
//! ```text
//! raw judge text ──parse──▶ Opinion ─┐
//! raw judge text ──parse──▶ Opinion ─┼──aggregate──▶ Verdict
//! (timeout)      ─────────▶ Opinion ─┘
//! ```
//!
//! - [`parsing`]: three-tier parser from judge text to [`Opinion`]
//! - [`consensus`]: quorum gate, weighted-then-count decision, [`Tally`]
//! - [`policy`]: tunable quorum and confidence thresholds
//! - [`rationale`]: explanation text carried by every [`Verdict`]

pub mod consensus;
pub mod decision;
pub mod opinion;
pub mod parsing;
pub mod policy;
pub mod rationale;
pub mod verdict;

// Re-export main types
pub use consensus::{ClassTally, MajorityRule, Resolution, Tally, aggregate};
pub use decision::Decision;
pub use opinion::{FAILURE_CANCELLED, FAILURE_TIMEOUT, Opinion};
pub use parsing::{
    ParseTier, classify_text, extract_json_fragment, parse_fragment, parse_opinion,
    parse_opinion_with_tier, parse_strict,
};
pub use policy::ConsensusPolicy;
pub use verdict::Verdict;
