//! Application-level configuration.
//!
//! - [`VerificationParams`] - per-judge deadline, consensus policy and reward policy

pub mod verification_params;

pub use verification_params::{DEFAULT_JUDGE_DEADLINE, VerificationParams};
