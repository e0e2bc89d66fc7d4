//! Scripted judge clients shared by the use case tests.

use crate::ports::judge_client::{JudgeClient, JudgeError};
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use veriquorum_domain::{JudgeId, JudgePrompt};

/// What a scripted judge does when invoked
#[derive(Clone)]
pub(crate) enum Script {
    Reply(String),
    ReplyAfter(Duration, String),
    Fail(JudgeError),
    Hang,
    Panic,
}

pub(crate) struct ScriptedJudge {
    id: JudgeId,
    script: Script,
    calls: AtomicUsize,
    prompts: Mutex<Vec<JudgePrompt>>,
}

impl ScriptedJudge {
    pub(crate) fn new(id: &str, script: Script) -> Self {
        Self {
            id: JudgeId::try_new(id).unwrap(),
            script,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn replying(id: &str, reply: &str) -> Self {
        Self::new(id, Script::Reply(reply.to_string()))
    }

    /// A judge answering with a strict JSON opinion
    pub(crate) fn voting(id: &str, decision: &str, confidence: f64) -> Self {
        Self::replying(
            id,
            &format!(
                r#"{{"decision": "{decision}", "confidence": {confidence}, "reasoning": "{id} says {decision}", "evidence": []}}"#
            ),
        )
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_prompt(&self) -> Option<JudgePrompt> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl JudgeClient for ScriptedJudge {
    fn judge_id(&self) -> &JudgeId {
        &self.id
    }

    async fn invoke(&self, prompt: &JudgePrompt) -> Result<String, JudgeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.clone());
        match &self.script {
            Script::Reply(text) => Ok(text.clone()),
            Script::ReplyAfter(delay, text) => {
                tokio::time::sleep(*delay).await;
                Ok(text.clone())
            }
            Script::Fail(error) => Err(error.clone()),
            Script::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            Script::Panic => panic!("scripted judge panic"),
        }
    }
}
