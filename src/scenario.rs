//! Scenario definitions
//!
//! A [`Scenario`] holds the fixed literals of one scenario run and the
//! layout of its files. The built-in default is the ILogger transformation;
//! other scenarios can be described in a TOML file:
//!
//! ```toml
//! scenario = "ILogger"
//! workflow_path = "workflows/ILogger_transform_workflow.yaml"
//! language_model = "gpt-4"
//! ```
//!
//! Relative paths resolve against `base_dir`, which defaults to the
//! directory holding the TOML file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{Credential, OutputMode, RunConfig};
use crate::error::{Result, RunnerError};

/// Environment variable holding the model-provider credential
pub const DEFAULT_CREDENTIAL_VAR: &str = "openai_api_key";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    /// Root that relative paths resolve against
    pub base_dir: PathBuf,
    pub workflow_path: PathBuf,
    pub input_dir: PathBuf,
    pub kb_dir: PathBuf,

    pub organization: String,
    pub scenario: String,
    pub task: String,
    pub task_source: String,
    pub api_base: String,
    pub api_version: String,
    pub api_type: String,
    pub language_model: String,
    pub output_mode: OutputMode,

    pub credential_var: String,
}

impl Default for Scenario {
    fn default() -> Self {
        Self::ilogger(".")
    }
}

impl Scenario {
    /// ILogger transformation with knowledge base and iterative planner
    pub fn ilogger(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            workflow_path: PathBuf::from("workflows/ILogger_transform_workflow.yaml"),
            input_dir: PathBuf::from("input"),
            kb_dir: PathBuf::from("kb"),
            organization: "observability".to_string(),
            scenario: "ILogger".to_string(),
            task: "workflow".to_string(),
            task_source: "local".to_string(),
            api_base: "https://yunlaitest.openai.azure.com/".to_string(),
            api_version: "2023-03-15-preview".to_string(),
            api_type: "azure".to_string(),
            language_model: "gpt-4".to_string(),
            output_mode: OutputMode::Return,
            credential_var: DEFAULT_CREDENTIAL_VAR.to_string(),
        }
    }

    /// Load a scenario from a TOML file
    ///
    /// Missing keys keep their ILogger defaults. Without an explicit
    /// `base_dir` the file's own directory is used.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| RunnerError::ScenarioFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&content, path)?.absolutize()
    }

    fn from_toml(content: &str, path: &Path) -> Result<Self> {
        let table: toml::Table = content.parse().map_err(|e: toml::de::Error| {
            RunnerError::ScenarioFile {
                path: path.to_path_buf(),
                reason: e.message().to_string(),
            }
        })?;
        let has_base_dir = table.contains_key("base_dir");

        let mut scenario: Scenario = toml::Value::Table(table)
            .try_into()
            .map_err(|e: toml::de::Error| RunnerError::ScenarioFile {
                path: path.to_path_buf(),
                reason: e.message().to_string(),
            })?;

        let file_dir = path.parent().unwrap_or_else(|| Path::new("."));
        if !has_base_dir {
            scenario.base_dir = file_dir.to_path_buf();
        } else if scenario.base_dir.is_relative() {
            scenario.base_dir = file_dir.join(&scenario.base_dir);
        }

        Ok(scenario)
    }

    /// Anchor a relative `base_dir` at the current directory
    ///
    /// The engine may run elsewhere, so every directory it receives must be
    /// absolute.
    pub fn absolutize(mut self) -> Result<Self> {
        if self.base_dir.is_relative() {
            self.base_dir = std::path::absolute(&self.base_dir)?;
        }
        Ok(self)
    }

    /// Absolute-or-base-relative path of the workflow definition
    pub fn workflow_file(&self) -> PathBuf {
        self.resolve(&self.workflow_path)
    }

    pub fn transform_dir(&self) -> PathBuf {
        self.resolve(&self.input_dir)
    }

    pub fn kb_local_dir(&self) -> PathBuf {
        self.resolve(&self.kb_dir)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Assemble the engine options for this scenario
    pub fn run_config(&self, workflow_content: String, credential: Credential) -> RunConfig {
        RunConfig {
            organization: self.organization.clone(),
            scenario: self.scenario.clone(),
            task: self.task.clone(),
            task_source: self.task_source.clone(),
            transform_local_dir: self.transform_dir().to_string_lossy().into_owned(),
            kb_local_dir: self.kb_local_dir().to_string_lossy().into_owned(),
            workflow_content,
            credential,
            api_base: self.api_base.clone(),
            api_version: self.api_version.clone(),
            api_type: self.api_type.clone(),
            language_model: self.language_model.clone(),
            output_mode: self.output_mode.clone(),
        }
    }
}
