use anyhow::{Context, Result};
use apideploy_config::{DeployConfig, FailurePolicy};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Import swagger.deploy.<gateway>.<stage>.json files into API Gateway
#[derive(Parser)]
#[command(name = "apideploy")]
#[command(version)]
#[command(about = "Import swagger.deploy.<gateway>.<stage>.json files into API Gateway", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// AWS region passed to the importer (overrides env and config file)
    #[arg(short, long, value_name = "REGION", global = true)]
    region: Option<String>,

    /// Directory scanned for API definition files
    #[arg(short, long, value_name = "DIR", global = true)]
    source_dir: Option<PathBuf>,

    /// Importer program invoked once per file
    #[arg(short, long, value_name = "PATH", global = true)]
    importer: Option<PathBuf>,

    /// Stop at the first failed import instead of continuing
    #[arg(long, global = true)]
    stop_on_failure: bool,

    /// Log level: trace, debug, info, warn, error
    #[arg(short = 'v', long, value_name = "LEVEL", global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Import every eligible file (default if no subcommand given)
    Deploy,
    /// List eligible files without running the importer
    Plan,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Step 1: defaults, config file, env overrides
    let mut config =
        DeployConfig::load_layers(cli.config.as_deref()).context("Failed to load configuration")?;

    // Step 2: CLI overrides (highest priority)
    apply_cli_overrides(&mut config, &cli);

    // Step 3: tracing early so validation warnings show up
    apideploy::init_tracing(&config.log);

    // Step 4: validate before the source directory is touched
    config.validate().context("Invalid configuration")?;

    match cli.command {
        Some(Commands::Plan) => run_plan(&config),
        Some(Commands::Deploy) | None => run_deploy(&config),
    }
}

fn apply_cli_overrides(config: &mut DeployConfig, cli: &Cli) {
    if let Some(region) = &cli.region {
        config.region = region.clone();
    }
    if let Some(dir) = &cli.source_dir {
        config.source_dir = dir.clone();
    }
    if let Some(importer) = &cli.importer {
        config.importer = importer.clone();
    }
    if cli.stop_on_failure {
        config.failure_policy = FailurePolicy::StopOnFirstFailure;
    }
    if let Some(level) = &cli.log_level {
        config.log.level = level.clone();
    }
}

fn run_deploy(config: &DeployConfig) -> Result<()> {
    // Failed imports only end the run under the stop policy, which surfaces as Err here
    apideploy::deploy(config)?;
    Ok(())
}

fn run_plan(config: &DeployConfig) -> Result<()> {
    for job in apideploy::plan(config)? {
        println!(
            "{}\t{}\t{}",
            job.gateway_id,
            job.stage,
            job.file_path.display()
        );
    }
    Ok(())
}
