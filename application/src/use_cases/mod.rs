//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod fan_out;
pub mod run_judge;
pub mod verify_content;

#[cfg(test)]
pub(crate) mod scripted_judge;
