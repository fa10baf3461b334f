//! Bandish runner CLI

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use bandish_runner::engine::{create_engine, EngineSpec};
use bandish_runner::error::{FixSuggestion, Result, RunnerError};
use bandish_runner::{Engine, EnvCredentials, MockEngine, OutputMode, Scenario, ScenarioRunner};

#[derive(Parser)]
#[command(name = "bandish-run")]
#[command(about = "Run a Bandish transformation scenario")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the scenario and print the engine's output_info
    Run {
        #[command(flatten)]
        scenario: ScenarioArgs,

        /// Engine to invoke (command, http, mock)
        #[arg(short, long, default_value = "command")]
        engine: String,

        /// Engine program for the command engine
        #[arg(long)]
        engine_program: Option<String>,

        /// Engine argument for the command engine (repeatable)
        #[arg(long = "engine-arg", allow_hyphen_values = true)]
        engine_args: Vec<String>,

        /// Endpoint URL for the http engine
        #[arg(long)]
        endpoint: Option<String>,

        /// Print the run configuration (credential masked) instead of running
        #[arg(long)]
        dry_run: bool,
    },

    /// Check that the workflow definition is readable YAML (no engine call)
    Check {
        #[command(flatten)]
        scenario: ScenarioArgs,
    },
}

#[derive(Args)]
struct ScenarioArgs {
    /// Directory holding workflows/, input/ and kb/
    #[arg(short, long)]
    base_dir: Option<PathBuf>,

    /// TOML scenario file (defaults to the built-in ILogger scenario)
    #[arg(short, long)]
    scenario_file: Option<PathBuf>,

    /// Override the language model
    #[arg(short, long)]
    model: Option<String>,

    /// Override the output mode (return, ...)
    #[arg(long)]
    output_mode: Option<String>,

    /// Environment variable holding the credential
    #[arg(long)]
    credential_var: Option<String>,
}

impl ScenarioArgs {
    fn resolve(self) -> Result<Scenario> {
        let mut scenario = match &self.scenario_file {
            Some(path) => Scenario::load(path)?,
            None => Scenario::ilogger(PathBuf::from(".")),
        };

        if let Some(base_dir) = self.base_dir {
            scenario.base_dir = base_dir;
        }
        if let Some(model) = self.model {
            scenario.language_model = model;
        }
        if let Some(mode) = self.output_mode {
            scenario.output_mode = OutputMode::from(mode);
        }
        if let Some(var) = self.credential_var {
            scenario.credential_var = var;
        }

        scenario.absolutize()
    }
}

#[tokio::main]
async fn main() {
    // Load .env file (ignore if not present)
    let _ = dotenvy::dotenv();

    // Logs go to stderr; stdout carries only the run output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            scenario,
            engine,
            engine_program,
            engine_args,
            endpoint,
            dry_run,
        } => {
            let spec = EngineSpec {
                name: engine,
                program: engine_program,
                args: engine_args,
                endpoint,
            };
            run_scenario(scenario, spec, dry_run).await
        }
        Commands::Check { scenario } => check_workflow(scenario),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

async fn run_scenario(args: ScenarioArgs, spec: EngineSpec, dry_run: bool) -> Result<()> {
    let scenario = args.resolve()?;
    let credentials = Box::new(EnvCredentials::new(scenario.credential_var.clone()));

    if dry_run {
        // The engine is never contacted, so it is not built either
        let config = ScenarioRunner::new(scenario, Arc::new(MockEngine::new()), credentials)
            .prepare()?;
        println!("{}", serde_json::to_string_pretty(&config.redacted())?);
        return Ok(());
    }

    let engine: Arc<dyn Engine> = Arc::from(create_engine(&spec)?);
    if !engine.is_available() {
        tracing::warn!(engine = engine.name(), "Engine does not look available");
    }

    let runner = ScenarioRunner::new(scenario, engine, credentials);

    let stdout = std::io::stdout();
    runner.run_scenario(&mut stdout.lock()).await
}

fn check_workflow(args: ScenarioArgs) -> Result<()> {
    let scenario = args.resolve()?;
    let path = scenario.workflow_file();
    let content = std::fs::read_to_string(&path).map_err(|source| RunnerError::WorkflowRead {
        path: path.clone(),
        source,
    })?;

    let doc: serde_yaml::Value = serde_yaml::from_str(&content)?;
    let keys = doc.as_mapping().map(|m| m.len()).unwrap_or(0);

    println!(
        "{} Workflow '{}' is valid YAML ({} bytes, {} top-level keys)",
        "✓".green(),
        path.display(),
        content.len(),
        keys
    );
    println!("  Scenario: {}/{}", scenario.organization, scenario.scenario);
    println!("  Model: {}", scenario.language_model);

    Ok(())
}
