//! Run result decoding

use serde::{Deserialize, Serialize};

use crate::error::{Result, RunnerError};

/// Structured record returned by the engine
///
/// Only `output_info` is read. Everything else the engine sends is kept in
/// `extra` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub output_info: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RunResult {
    /// Decode the engine's textual response
    pub fn parse(response: &str) -> Result<Self> {
        serde_json::from_str(response).map_err(RunnerError::InvalidResponse)
    }
}
