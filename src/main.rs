//! CLI entry point for gan-smoke-rs.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gan_smoke_rs::config;
use gan_smoke_rs::mocks::trainer::MockTrainerFactory;
use gan_smoke_rs::runner::{run_suite, RunReport};
use gan_smoke_rs::scenario::{default_suite, load_suite, Scenario};
use gan_smoke_rs::tracking::{ExperimentGuard, TrackingClient};
use gan_smoke_rs::Result;

#[derive(Parser)]
#[command(name = "gan-smoke")]
#[command(about = "Functional smoke tests for the multi-task GAN training stack")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the scenario suite
    Run {
        /// Path to a baseline configuration file (defaults to the built-in baseline)
        #[arg(long)]
        config: Option<String>,
        /// Path to a scenario suite file (defaults to the built-in suite)
        #[arg(long)]
        suite: Option<String>,
        /// Tracking project for the shared experiment record
        #[arg(long, default_value = "gan-smoke-test")]
        project: String,
        /// Keep the tracked experiment record after the run
        #[arg(long)]
        no_delete: bool,
        /// Disable the end-to-end flag on every scenario
        #[arg(long)]
        no_end_to_end: bool,
    },
    /// List the scenarios of a suite
    List {
        /// Path to a scenario suite file (defaults to the built-in suite)
        #[arg(long)]
        suite: Option<String>,
    },
    /// Write the built-in baseline configuration to a file
    Init {
        /// Output path for the baseline file
        #[arg(default_value = "baseline.yaml")]
        output: String,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            suite,
            project,
            no_delete,
            no_end_to_end,
        } => {
            let report = cmd_run(config, suite, &project, no_delete, no_end_to_end)?;
            if !report.all_passed() {
                // the tracking guard was released inside cmd_run
                std::process::exit(1);
            }
        }
        Commands::List { suite } => cmd_list(suite)?,
        Commands::Init { output } => {
            let base = config::base_config()?;
            std::fs::write(&output, serde_yaml::to_string(&base)?)?;
            println!("✓ Baseline configuration written to: {output}");
        }
    }

    Ok(())
}

fn cmd_run(
    config_path: Option<String>,
    suite_path: Option<String>,
    project: &str,
    no_delete: bool,
    no_end_to_end: bool,
) -> Result<RunReport> {
    let mut base = match config_path {
        Some(path) => config::load_config(path)?,
        None => config::base_config()?,
    };
    config::tune_for_smoke(&mut base)?;

    let mut suite = load_or_default_suite(suite_path)?;
    if no_end_to_end {
        for scenario in &mut suite {
            scenario.end_to_end = false;
        }
    }

    let guard = match TrackingClient::from_env() {
        Some(client) => {
            let experiment = client.create_experiment(project, 0)?;
            tracing::info!(key = %experiment.key, project, "created tracked experiment");
            let admin = TrackingClient::admin_from_env().unwrap_or(client);
            let mut guard = ExperimentGuard::new(admin, experiment);
            if no_delete {
                guard.keep();
            }
            Some(guard)
        }
        None => {
            tracing::info!("TRACKING_API_KEY not set; running untracked");
            None
        }
    };

    run_suite(
        &MockTrainerFactory,
        &base,
        &suite,
        guard.as_ref().map(ExperimentGuard::experiment),
    )
}

fn cmd_list(suite_path: Option<String>) -> Result<()> {
    let suite = load_or_default_suite(suite_path)?;
    for (index, scenario) in suite.iter().enumerate() {
        let description = scenario.description.as_deref().unwrap_or("(no description)");
        println!(
            "{index}: {description} [track: {}, end-to-end: {}, overrides: {}]",
            scenario.track,
            scenario.end_to_end,
            scenario.overrides.len()
        );
    }
    Ok(())
}

fn load_or_default_suite(suite_path: Option<String>) -> Result<Vec<Scenario>> {
    match suite_path {
        Some(path) => load_suite(path),
        None => Ok(default_suite()),
    }
}
