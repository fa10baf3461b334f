//! Bandish runner - run transformation scenarios against the Bandish engine

pub mod config;
pub mod credentials;
pub mod engine;
pub mod error;
pub mod output;
pub mod runner;
pub mod scenario;

pub use config::{Credential, OutputMode, RunConfig};
pub use credentials::{CredentialSource, EnvCredentials, StaticCredential};
pub use engine::{create_engine, CommandEngine, Engine, EngineSpec, HttpEngine, MockEngine};
pub use error::{FixSuggestion, Result, RunnerError};
pub use output::RunResult;
pub use runner::ScenarioRunner;
pub use scenario::Scenario;
