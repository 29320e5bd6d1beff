//! cronbind — plan and validate scheduled-invocation triggers.
//!
//! Loads a directory of `ScheduleSpec` YAML documents, runs them through
//! the resolve → bind → grant pipeline against a fresh registry, and
//! prints the resulting rule/target/grant descriptors. Nothing here talks
//! to the cloud; the output is a plan for the provisioning engine.

use std::path::PathBuf;

use anyhow::bail;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};

use cronbind_core::config::{load_dotenv, DeployConfig};
use cronbind_provision::binder::DeploymentRegistry;
use cronbind_provision::descriptor::Plan;
use cronbind_provision::loader::{LoadStatus, SpecLoader};
use cronbind_provision::pipeline::provision_all;
use cronbind_provision::validation::{validate_batch, ValidationResult};

/// Scheduled-invocation trigger planner.
#[derive(Parser, Debug)]
#[command(name = "cronbind", version, about)]
struct Cli {
    /// Configuration profile (also read from CRONBIND_PROFILE).
    #[arg(long, env = "CRONBIND_PROFILE", default_value = "")]
    profile: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve all specs and print the rule/target/grant plan.
    Plan {
        /// Directory containing ScheduleSpec YAML files.
        #[arg(long, env = "CRONBIND_SPECS_DIR", default_value = "data/specs")]
        specs_dir: PathBuf,

        /// Output encoding.
        #[arg(long, value_enum, default_value_t = Format::Yaml)]
        format: Format,
    },
    /// Validate specs and print structured errors and warnings.
    Validate {
        /// Directory containing ScheduleSpec YAML files.
        #[arg(long, env = "CRONBIND_SPECS_DIR", default_value = "data/specs")]
        specs_dir: PathBuf,

        /// Output encoding.
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print the active deployment configuration.
    Config,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Text,
    Json,
    Yaml,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    load_dotenv();
    let cli = Cli::parse();
    let config = DeployConfig::for_profile(&cli.profile);

    match cli.command {
        Command::Plan { specs_dir, format } => plan(&config, specs_dir, format),
        Command::Validate { specs_dir, format } => validate(&config, specs_dir, format),
        Command::Config => {
            println!("{}", serde_json::to_string_pretty(&config.summary())?);
            Ok(())
        }
    }
}

fn load(specs_dir: PathBuf) -> anyhow::Result<(SpecLoader, usize)> {
    let mut loader = SpecLoader::new(specs_dir);
    let results = loader.load_all()?;

    let mut failed = 0;
    for result in &results {
        match &result.status {
            LoadStatus::Loaded { .. } => {}
            LoadStatus::Skipped { reason } => {
                info!(path = %result.path.display(), reason = %reason, "skipped file");
            }
            LoadStatus::Failed { error } => {
                warn!(path = %result.path.display(), error = %error, "failed to load spec");
                failed += 1;
            }
        }
    }
    Ok((loader, failed))
}

fn plan(config: &DeployConfig, specs_dir: PathBuf, format: Format) -> anyhow::Result<()> {
    config.log_summary();
    if !config.aws.is_configured() {
        warn!("AWS_ACCOUNT_ID not set; generated ARNs use a placeholder account");
    }

    let (loader, load_failures) = load(specs_dir)?;
    let specs = loader.schedule_specs();
    info!(count = specs.len(), "resolving specs");

    let mut registry = DeploymentRegistry::new();
    let outcome = provision_all(specs.iter(), config, &mut registry);
    let plan = Plan::from(&outcome);

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
        Format::Yaml | Format::Text => print!("{}", serde_yaml::to_string(&plan)?),
    }

    let spec_failures = plan.failures.len();
    if load_failures + spec_failures > 0 {
        bail!(
            "{} file(s) failed to load, {} spec(s) failed to provision",
            load_failures,
            spec_failures
        );
    }
    Ok(())
}

fn validate(config: &DeployConfig, specs_dir: PathBuf, format: Format) -> anyhow::Result<()> {
    let (loader, load_failures) = load(specs_dir)?;
    let specs = loader.schedule_specs();
    let result = validate_batch(&specs, &config.naming);

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        Format::Yaml => print!("{}", serde_yaml::to_string(&result)?),
        Format::Text => print_validation(&result),
    }

    if load_failures > 0 {
        bail!("{} file(s) failed to load", load_failures);
    }
    if !result.valid {
        bail!("{} validation error(s)", result.errors.len());
    }
    Ok(())
}

fn print_validation(result: &ValidationResult) {
    for error in &result.errors {
        match &error.suggestion {
            Some(suggestion) => {
                println!("error [{}]: {} ({})", error.path, error.message, suggestion)
            }
            None => println!("error [{}]: {}", error.path, error.message),
        }
    }
    for warning in &result.warnings {
        println!("warning [{}]: {}", warning.path, warning.message);
    }
    if result.valid {
        println!(
            "ok: all specs valid ({} warning(s))",
            result.warnings.len()
        );
    }
}
