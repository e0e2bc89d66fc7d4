//! Domain layer for veriquorum
//!
//! This crate contains the core verification logic: judge opinions, the
//! three-tier response parser, consensus aggregation and reward scaling.
//! It has no dependencies on I/O, async runtimes or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Judge**: an independent opinion source asked the same question as its peers
//! - **Opinion**: one judge's structured answer, or a failure placeholder
//! - **Verdict**: the panel's aggregated answer, with confidence, consensus
//!   score and a rationale that always explains an `uncertain` outcome
//! - **Quorum**: minimum number of successful opinions before a verdict can
//!   be anything but `uncertain`

pub mod config;
pub mod core;
pub mod prompt;
pub mod quorum;
pub mod reward;

// Re-export commonly used types
pub use config::OutputFormat;
pub use crate::core::{
    error::DomainError,
    judge::JudgeId,
    request::{EvidenceBlock, EvidenceKind, VerificationRequest},
};
pub use prompt::{JudgePrompt, PromptTemplate};
pub use quorum::{
    ClassTally, ConsensusPolicy, Decision, MajorityRule, Opinion, ParseTier, Resolution, Tally,
    Verdict, aggregate, parse_opinion, parse_opinion_with_tier,
};
pub use reward::{RewardAssessment, RewardPolicy, estimate_popularity};
