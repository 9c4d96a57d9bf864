//! Scripted `Inference` stub for tests. Replies are picked by prompt content first,
//! then by system role, then the fallback.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{InferOptions, Inference, LlmError};

#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Fail(String),
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text(text.into())
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Reply::Fail(message.into())
    }

    fn produce(&self) -> Result<String, LlmError> {
        match self {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Fail(message) => Err(LlmError::Api {
                status: 503,
                message: message.clone(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system_role: String,
    pub prompt: String,
    pub options: InferOptions,
}

pub struct ScriptedInference {
    by_prompt: Vec<(String, Reply)>,
    by_system: Vec<(String, Reply)>,
    fallback: Reply,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedInference {
    pub fn new(fallback: Reply) -> Self {
        Self {
            by_prompt: Vec::new(),
            by_system: Vec::new(),
            fallback,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn always_ok(text: &str) -> Self {
        Self::new(Reply::text(text))
    }

    pub fn always_fail(message: &str) -> Self {
        Self::new(Reply::fail(message))
    }

    /// Replies with `reply` whenever the system role equals `system_role`.
    pub fn on_system(mut self, system_role: &str, reply: Reply) -> Self {
        self.by_system.push((system_role.to_string(), reply));
        self
    }

    /// Replies with `reply` whenever the prompt contains `needle`.
    pub fn on_prompt(mut self, needle: &str, reply: Reply) -> Self {
        self.by_prompt.push((needle.to_string(), reply));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_with_system(&self, system_role: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.system_role == system_role)
            .collect()
    }
}

#[async_trait]
impl Inference for ScriptedInference {
    async fn infer(
        &self,
        system_role: &str,
        prompt: &str,
        options: &InferOptions,
    ) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            system_role: system_role.to_string(),
            prompt: prompt.to_string(),
            options: *options,
        });

        let reply = self
            .by_prompt
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .or_else(|| self.by_system.iter().find(|(role, _)| role == system_role))
            .map(|(_, reply)| reply)
            .unwrap_or(&self.fallback);

        reply.produce()
    }
}
