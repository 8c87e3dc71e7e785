//! In-process backend replaying a fixed script.
//!
//! Used by tests and offline runs: each `complete` call pops the next
//! [`ScriptedReply`]. An exhausted script answers with a backend error.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::{AdvisorError, CompletionBackend};

#[derive(Clone, Debug)]
pub enum ScriptedReply {
    Text(String),
    Delayed(String, Duration),
    Error(String),
}

impl ScriptedReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn delayed(text: impl Into<String>, delay: Duration) -> Self {
        Self::Delayed(text.into(), delay)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }
}

#[derive(Debug)]
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<ScriptedReply>>,
    reachable: bool,
    calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn new(replies: impl IntoIterator<Item = ScriptedReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            reachable: true,
            calls: AtomicUsize::new(0),
        }
    }

    /// Makes every probe fail.
    pub fn unreachable(mut self) -> Self {
        self.reachable = false;
        self
    }

    /// Number of `complete` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next_reply(&self) -> Option<ScriptedReply> {
        match self.replies.lock() {
            Ok(mut replies) => replies.pop_front(),
            Err(poisoned) => poisoned.into_inner().pop_front(),
        }
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    fn provider(&self) -> &str {
        "scripted"
    }

    async fn probe(&self) -> Result<(), AdvisorError> {
        if self.reachable {
            Ok(())
        } else {
            Err(AdvisorError::Backend("scripted backend unreachable".into()))
        }
    }

    async fn complete(&self, _prompt: &str) -> Result<String, AdvisorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match self.next_reply() {
            Some(ScriptedReply::Text(text)) => Ok(text),
            Some(ScriptedReply::Delayed(text, delay)) => {
                tokio::time::sleep(delay).await;
                Ok(text)
            }
            Some(ScriptedReply::Error(message)) => Err(AdvisorError::Backend(message)),
            None => Err(AdvisorError::Backend("script exhausted".into())),
        }
    }
}
