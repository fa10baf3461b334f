//! Error types with fix suggestions

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, RunnerError>;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

#[derive(Error, Debug)]
pub enum RunnerError {
    // ─────────────────────────────────────────────────────────────
    // Local resources
    // ─────────────────────────────────────────────────────────────
    #[error("Cannot read workflow definition '{}': {source}", .path.display())]
    WorkflowRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Credential environment variable '{var}' is not set")]
    MissingCredential { var: String },

    #[error("Credential environment variable '{var}' is not valid UTF-8")]
    CredentialNotUnicode { var: String },

    #[error("Invalid scenario file '{}': {reason}", .path.display())]
    ScenarioFile { path: PathBuf, reason: String },

    #[error("Workflow definition is not valid YAML: {0}")]
    WorkflowYaml(#[from] serde_yaml::Error),

    // ─────────────────────────────────────────────────────────────
    // Engine boundary
    // ─────────────────────────────────────────────────────────────
    #[error("Unknown engine: '{0}'. Available: command, http, mock")]
    UnknownEngine(String),

    #[error("Engine '{engine}' is unavailable: {reason}")]
    EngineUnavailable { engine: String, reason: String },

    #[error("Engine '{engine}' failed: {message}")]
    Engine { engine: String, message: String },

    #[error("Invalid engine endpoint '{endpoint}': {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Engine response is not a valid run result: {0}")]
    InvalidResponse(#[source] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Generic
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RunnerError {
    /// Engine failure shorthand
    pub fn engine(engine: impl Into<String>, message: impl Into<String>) -> Self {
        RunnerError::Engine {
            engine: engine.into(),
            message: message.into(),
        }
    }
}

impl FixSuggestion for RunnerError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            RunnerError::WorkflowRead { .. } => {
                Some("Check --base-dir and the workflow_path of the scenario")
            }
            RunnerError::MissingCredential { .. } => {
                Some("Export the variable or add it to a .env file in the working directory")
            }
            RunnerError::CredentialNotUnicode { .. } => {
                Some("Re-export the variable with a plain UTF-8 value")
            }
            RunnerError::ScenarioFile { .. } => Some("Check TOML syntax and field names"),
            RunnerError::WorkflowYaml(_) => Some("Check YAML syntax: indentation and quoting"),
            RunnerError::UnknownEngine(_) => Some("Use --engine command, http or mock"),
            RunnerError::EngineUnavailable { .. } => {
                Some("Install the engine or point --engine-program at it")
            }
            RunnerError::InvalidEndpoint { .. } => {
                Some("Use an absolute URL such as http://localhost:8080/run")
            }
            RunnerError::Http(_) => Some("Check that the engine server is reachable"),
            RunnerError::InvalidResponse(_) => {
                Some("The engine must answer with a JSON object containing 'output_info'")
            }
            RunnerError::Engine { .. } | RunnerError::Io(_) | RunnerError::Json(_) => None,
        }
    }
}
