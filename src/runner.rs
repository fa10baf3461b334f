//! Scenario runner
//!
//! One linear pass per run:
//!
//! 1. read the workflow definition
//! 2. resolve the credential
//! 3. build the [`RunConfig`]
//! 4. invoke the engine
//! 5. decode the [`RunResult`] and print `output_info`
//!
//! Steps 1 and 2 fail before the engine is ever called. Nothing is retried.

use std::io::Write;
use std::sync::Arc;

use crate::config::RunConfig;
use crate::credentials::CredentialSource;
use crate::engine::Engine;
use crate::error::{Result, RunnerError};
use crate::output::RunResult;
use crate::scenario::Scenario;

pub struct ScenarioRunner {
    scenario: Scenario,
    engine: Arc<dyn Engine>,
    credentials: Box<dyn CredentialSource>,
}

impl ScenarioRunner {
    pub fn new(
        scenario: Scenario,
        engine: Arc<dyn Engine>,
        credentials: Box<dyn CredentialSource>,
    ) -> Self {
        Self {
            scenario,
            engine,
            credentials,
        }
    }

    /// Read local inputs and build the run configuration
    ///
    /// Does not touch the engine.
    pub fn prepare(&self) -> Result<RunConfig> {
        let path = self.scenario.workflow_file();
        let workflow_content =
            std::fs::read_to_string(&path).map_err(|source| RunnerError::WorkflowRead {
                path: path.clone(),
                source,
            })?;

        tracing::debug!(
            path = %path.display(),
            bytes = workflow_content.len(),
            "Workflow definition loaded"
        );

        let credential = self.credentials.credential()?;
        Ok(self.scenario.run_config(workflow_content, credential))
    }

    /// Invoke the engine and decode its answer
    pub async fn run(&self) -> Result<RunResult> {
        let config = self.prepare()?;

        tracing::info!(
            engine = self.engine.name(),
            scenario = %config.scenario,
            model = %config.language_model,
            "Running scenario"
        );

        let response = self.engine.invoke(&config).await?;
        let result = RunResult::parse(&response)?;

        tracing::info!(
            engine = self.engine.name(),
            extra_fields = result.extra.len(),
            "Scenario finished"
        );

        Ok(result)
    }

    /// Run and write `output_info` to `out`, once
    pub async fn run_scenario<W: Write>(&self, out: &mut W) -> Result<()> {
        let result = self.run().await?;
        writeln!(out, "{}", result.output_info)?;
        out.flush()?;
        Ok(())
    }
}
