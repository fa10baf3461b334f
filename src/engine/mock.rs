//! Mock engine for testing
//!
//! Returns configurable responses without running anything.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::Engine;
use crate::config::RunConfig;
use crate::error::{Result, RunnerError};

/// Response when the queue is empty
pub const DEFAULT_RESPONSE: &str = r#"{"output_info":"Mock run completed"}"#;

/// Mock engine that returns predefined responses
#[derive(Clone)]
pub struct MockEngine {
    /// Queue of responses to return (FIFO)
    responses: Arc<Mutex<VecDeque<String>>>,
    /// Default response when queue is empty
    default_response: String,
    /// When set, every call fails with this message
    failure: Option<String>,
    /// Track all configs received (for assertions)
    calls: Arc<Mutex<Vec<RunConfig>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockEngine {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            default_response: DEFAULT_RESPONSE.to_string(),
            failure: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create with a queue of responses
    pub fn with_responses(responses: Vec<String>) -> Self {
        let engine = Self::new();
        lock(&engine.responses).extend(responses);
        engine
    }

    /// Set the default response when queue is empty
    pub fn with_default(mut self, response: impl Into<String>) -> Self {
        self.default_response = response.into();
        self
    }

    /// Make every call fail as an engine error
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    pub fn queue_response(&self, response: impl Into<String>) {
        lock(&self.responses).push_back(response.into());
    }

    /// All configs received so far
    pub fn calls(&self) -> Vec<RunConfig> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn last_call(&self) -> Option<RunConfig> {
        lock(&self.calls).last().cloned()
    }
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Engine for MockEngine {
    fn name(&self) -> &str {
        "mock"
    }

    async fn invoke(&self, config: &RunConfig) -> Result<String> {
        lock(&self.calls).push(config.clone());

        if let Some(message) = &self.failure {
            return Err(RunnerError::engine("mock", message.clone()));
        }

        let response = lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| self.default_response.clone());
        Ok(response)
    }
}
