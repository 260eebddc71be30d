//! The text-generation seam between the comparator and a model backend.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::AiError;

/// A backend that turns one prompt into one block of text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Backend identifier (e.g. the model name).
    fn id(&self) -> &str;

    /// Generate a completion for `prompt`. Called once per comparison.
    async fn generate(&self, prompt: &str) -> Result<String, AiError>;
}

/// Generator that replays canned replies in order and records prompts.
///
/// When the script runs out, the last reply repeats. An empty script yields
/// an upstream error.
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<String>>,
    last: Mutex<Option<String>>,
    prompts: Mutex<Vec<String>>,
    call_count: AtomicUsize,
}

impl ScriptedGenerator {
    #[must_use]
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            last: Mutex::new(None),
            prompts: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    /// Always answer with `reply`.
    #[must_use]
    pub fn constant(reply: impl Into<String>) -> Self {
        Self::new([reply.into()])
    }

    /// Number of `generate` calls so far.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Prompts received, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    fn id(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        let next = self.replies.lock().ok().and_then(|mut r| r.pop_front());
        let mut last = self
            .last
            .lock()
            .map_err(|_| AiError::Parse("scripted generator poisoned".into()))?;
        if let Some(reply) = next {
            *last = Some(reply);
        }
        last.clone().ok_or_else(|| AiError::Api {
            status: 503,
            message: "script exhausted".into(),
        })
    }
}
