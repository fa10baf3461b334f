//! Credential sources
//!
//! The runner never reads the environment itself. It asks a
//! [`CredentialSource`], so tests can hand in a fixed value.

use std::env::VarError;

use crate::config::Credential;
use crate::error::{Result, RunnerError};

pub trait CredentialSource: Send + Sync {
    /// Resolve the credential, failing if it is absent
    fn credential(&self) -> Result<Credential>;
}

/// Reads the credential from one process environment variable
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    var: String,
}

impl EnvCredentials {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl CredentialSource for EnvCredentials {
    fn credential(&self) -> Result<Credential> {
        match std::env::var(&self.var) {
            Ok(value) => Ok(Credential::new(value)),
            Err(VarError::NotPresent) => Err(RunnerError::MissingCredential {
                var: self.var.clone(),
            }),
            Err(VarError::NotUnicode(_)) => Err(RunnerError::CredentialNotUnicode {
                var: self.var.clone(),
            }),
        }
    }
}

/// Fixed credential
#[derive(Debug, Clone)]
pub struct StaticCredential(Credential);

impl StaticCredential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Credential::new(value))
    }
}

impl CredentialSource for StaticCredential {
    fn credential(&self) -> Result<Credential> {
        Ok(self.0.clone())
    }
}
