//! Core domain concepts shared across all subdomains.
//!
//! - [`judge::JudgeId`] - identity of one opinion source
//! - [`request::VerificationRequest`] - the content a panel of judges is asked about
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod judge;
pub mod request;
pub mod string;
