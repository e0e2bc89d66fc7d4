//! Prompt templates for judge dispatch

pub mod template;

pub use template::{JudgePrompt, PromptTemplate};
