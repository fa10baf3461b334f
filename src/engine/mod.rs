//! # Engine Boundary
//!
//! The workflow engine is external. This module is the only place that
//! talks to it.
//!
//! - [`Engine`] - one call: run configuration in, serialized result out
//! - [`CommandEngine`] - engine as a child process (JSON over stdin/stdout)
//! - [`HttpEngine`] - engine behind an HTTP endpoint (JSON POST)
//! - [`MockEngine`] - canned responses for tests and dry runs
//!
//! ## Available Engines
//!
//! | Engine | Transport | Requires |
//! |--------|-----------|----------|
//! | `command` | stdin/stdout | engine program on `PATH` (default `bandish`) |
//! | `http` | HTTP POST | `--endpoint` URL |
//! | `mock` | none | nothing |
//!
//! Engines do no retries and set no timeouts. A run blocks until the engine
//! answers.

mod command;
mod http;
mod mock;

pub use command::CommandEngine;
pub use http::HttpEngine;
pub use mock::MockEngine;

use async_trait::async_trait;

use crate::config::RunConfig;
use crate::error::{Result, RunnerError};

#[async_trait]
pub trait Engine: Send + Sync {
    /// Engine name for logs and errors ("command", "http", "mock")
    fn name(&self) -> &str;

    /// Run the scenario described by `config` and return the raw response
    ///
    /// The response is decoded by the caller. Engine-side failures come back
    /// as [`RunnerError::Engine`].
    async fn invoke(&self, config: &RunConfig) -> Result<String>;

    /// Whether the engine looks reachable without invoking it
    fn is_available(&self) -> bool {
        true
    }
}

/// Options for [`create_engine`]
#[derive(Debug, Clone, Default)]
pub struct EngineSpec {
    pub name: String,
    /// `command`: program to spawn
    pub program: Option<String>,
    /// `command`: arguments, replacing the defaults when non-empty
    pub args: Vec<String>,
    /// `http`: endpoint URL
    pub endpoint: Option<String>,
}

impl EngineSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Create an engine instance by name
pub fn create_engine(spec: &EngineSpec) -> Result<Box<dyn Engine>> {
    match spec.name.to_lowercase().as_str() {
        "command" => {
            let mut engine = CommandEngine::new();
            if let Some(program) = &spec.program {
                engine = engine.with_program(program.clone());
            }
            if !spec.args.is_empty() {
                engine = engine.with_args(spec.args.clone());
            }
            Ok(Box::new(engine))
        }
        "http" => {
            let endpoint = spec
                .endpoint
                .as_deref()
                .ok_or_else(|| RunnerError::EngineUnavailable {
                    engine: "http".to_string(),
                    reason: "no endpoint given (use --endpoint)".to_string(),
                })?;
            Ok(Box::new(HttpEngine::new(endpoint)?))
        }
        "mock" => Ok(Box::new(MockEngine::new())),
        _ => Err(RunnerError::UnknownEngine(spec.name.clone())),
    }
}
