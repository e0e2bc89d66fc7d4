//! Judge client adapters

pub mod chat_completions;

pub use chat_completions::{
    ChatCompletionsJudge, ChatCompletionsSettings, JudgePanel, JudgePanelError,
};
