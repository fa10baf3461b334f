//! Engine reached as a child process
//!
//! Spawns the engine program, writes the run parameters as one JSON object
//! to its stdin and reads the serialized result from its stdout.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::Engine;
use crate::config::RunConfig;
use crate::error::{Result, RunnerError};

/// Default engine program
pub const DEFAULT_PROGRAM: &str = "bandish";

/// Default arguments: read parameters from stdin
const DEFAULT_ARGS: &[&str] = &["run", "--params", "-"];

pub struct CommandEngine {
    program: String,
    args: Vec<String>,
}

impl CommandEngine {
    pub fn new() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            args: DEFAULT_ARGS.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Set a custom program path
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Replace the argument list
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    fn unavailable(&self, reason: impl Into<String>) -> RunnerError {
        RunnerError::EngineUnavailable {
            engine: format!("command ({})", self.program),
            reason: reason.into(),
        }
    }
}

impl Default for CommandEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Engine for CommandEngine {
    fn name(&self) -> &str {
        "command"
    }

    async fn invoke(&self, config: &RunConfig) -> Result<String> {
        let payload = serde_json::to_vec(&config.to_params()?)?;

        tracing::debug!(
            engine = "command",
            program = %self.program,
            bytes = payload.len(),
            "Spawning engine process"
        );

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.unavailable(e.to_string()))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| self.unavailable("stdin not captured"))?;

        // Feed stdin concurrently so a chatty engine cannot fill the stdout pipe first
        let writer = tokio::spawn(async move {
            stdin.write_all(&payload).await?;
            stdin.shutdown().await
        });

        let output = child.wait_with_output().await?;

        match writer.await {
            Ok(Ok(())) => {}
            // Engine exited without reading everything; its status says why
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
            Ok(Err(e)) => return Err(e.into()),
            Err(e) => return Err(RunnerError::engine("command", e.to_string())),
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::error!(
                engine = "command",
                status = %output.status,
                "Engine process failed"
            );
            return Err(RunnerError::engine(
                "command",
                format!("{} ({})", stderr.trim(), output.status),
            ));
        }

        String::from_utf8(output.stdout)
            .map_err(|_| RunnerError::engine("command", "stdout is not valid UTF-8"))
    }

    fn is_available(&self) -> bool {
        let program = Path::new(&self.program);
        if program.components().count() > 1 {
            return program.is_file();
        }
        std::env::var_os("PATH")
            .map(|paths| std::env::split_paths(&paths).any(|dir| dir.join(program).is_file()))
            .unwrap_or(false)
    }
}
