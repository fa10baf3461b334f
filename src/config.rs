//! Run configuration sent to the engine
//!
//! A [`RunConfig`] is built once per run, handed to [`Engine::invoke`] and
//! dropped. Field names on the wire follow the option names the engine
//! recognizes (`openai_api_key`, `language_model`, ...).
//!
//! Nothing here validates values. Empty or odd values go to the engine as-is.
//!
//! [`Engine::invoke`]: crate::engine::Engine::invoke

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Placeholder written in place of the credential in redacted output
pub const REDACTED: &str = "***";

/// Model-provider credential
///
/// Serializes as the plain string (the engine needs it) but never shows up
/// in `Debug` or `Display` output.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw secret
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

/// How the engine delivers its output
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OutputMode {
    /// Result comes back in the response
    #[default]
    Return,

    /// Any other delivery mode, passed through untouched
    Other(String),
}

impl OutputMode {
    pub fn as_str(&self) -> &str {
        match self {
            OutputMode::Return => "return",
            OutputMode::Other(mode) => mode,
        }
    }
}

impl From<String> for OutputMode {
    fn from(value: String) -> Self {
        if value == "return" {
            OutputMode::Return
        } else {
            OutputMode::Other(value)
        }
    }
}

impl From<&str> for OutputMode {
    fn from(value: &str) -> Self {
        OutputMode::from(value.to_string())
    }
}

impl From<OutputMode> for String {
    fn from(mode: OutputMode) -> Self {
        match mode {
            OutputMode::Return => "return".to_string(),
            OutputMode::Other(mode) => mode,
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full set of options for one engine invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunConfig {
    pub organization: String,
    pub scenario: String,
    pub task: String,
    pub task_source: String,
    pub transform_local_dir: String,
    pub kb_local_dir: String,
    pub workflow_content: String,
    #[serde(rename = "openai_api_key")]
    pub credential: Credential,
    #[serde(rename = "openai_api_base")]
    pub api_base: String,
    #[serde(rename = "openai_api_version")]
    pub api_version: String,
    #[serde(rename = "openai_api_type")]
    pub api_type: String,
    pub language_model: String,
    pub output_mode: OutputMode,
}

impl RunConfig {
    /// Number of options the engine receives
    pub const OPTION_COUNT: usize = 13;

    /// Key/value mapping handed to the engine, in declaration order
    pub fn to_params(&self) -> Result<serde_json::Map<String, serde_json::Value>> {
        Ok(serde_json::from_value(serde_json::to_value(self)?)?)
    }

    /// Copy with the credential masked, for display and logs
    pub fn redacted(&self) -> Self {
        Self {
            credential: Credential::new(REDACTED),
            ..self.clone()
        }
    }
}
