use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use super::client::CompletionClient;

/// A scripted outcome for one `complete` call
#[derive(Debug, Clone)]
pub enum ScriptedResponse {
    Reply(String),
    Failure(String),
}

/// Mock completion client for testing
///
/// Plays back scripted responses in FIFO order, one per `complete` call.
/// An exhausted script produces an error, which surfaces as a per-file
/// completion failure in the pipeline.
#[derive(Default)]
pub struct MockClient {
    script: Mutex<VecDeque<ScriptedResponse>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a client preloaded with responses
    pub fn with_script(responses: impl IntoIterator<Item = ScriptedResponse>) -> Self {
        Self {
            script: Mutex::new(responses.into_iter().collect()),
        }
    }

    /// Queue a successful reply
    pub fn push_reply(&self, text: impl Into<String>) {
        self.script
            .lock()
            .unwrap()
            .push_back(ScriptedResponse::Reply(text.into()));
    }

    /// Queue a transport failure
    pub fn push_failure(&self, message: impl Into<String>) {
        self.script
            .lock()
            .unwrap()
            .push_back(ScriptedResponse::Failure(message.into()));
    }

    /// Number of unconsumed scripted responses
    pub fn remaining(&self) -> usize {
        self.script.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionClient for MockClient {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(ScriptedResponse::Reply(text)) => Ok(text),
            Some(ScriptedResponse::Failure(message)) => Err(anyhow!(message)),
            None => Err(anyhow!("mock completion script exhausted")),
        }
    }

    fn client_name(&self) -> &'static str {
        "mock"
    }
}
