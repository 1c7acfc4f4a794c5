//! Monkeycam CLI - Command-line front end for the snow monkey detector

mod interactive;
mod render;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use monkeycam_core::{
    connect_classifier, probe_services, DaySelector, Detector, MonkeycamConfig, TimeSlot,
};

#[derive(Parser)]
#[command(name = "monkeycam")]
#[command(about = "Monkeycam - Were the snow monkeys at Jigokudani Yaen-Koen today?")]
#[command(version)]
struct Cli {
    /// Configuration file path (defaults to ./monkeycam.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Browse the camera interactively (default)
    Interactive,
    /// Run one detection and print the verdict
    Detect {
        /// Archive day: today or yesterday
        #[arg(short, long, default_value = "today")]
        day: DaySelector,
        /// Timeslot, e.g. 9am or 2pm (defaults to the configured slot)
        #[arg(short, long)]
        slot: Option<TimeSlot>,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show camera and model availability
    Status {
        /// Print the status as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check configuration validity
    Check,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<MonkeycamConfig> {
    let config = MonkeycamConfig::resolve(path).context("failed to load configuration")?;
    debug!("Resolved configuration for {}", config.site.base_url);
    Ok(config)
}

async fn detect(
    config: MonkeycamConfig,
    day: DaySelector,
    slot: Option<TimeSlot>,
    json: bool,
) -> anyhow::Result<()> {
    let classifier = connect_classifier(&config.classifier)
        .await
        .context("classifier unavailable")?;
    let detector = Detector::new(config, &classifier)?;

    let outcome = detector.detect(day, slot).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", render::outcome(&outcome));
    }
    Ok(())
}

async fn status(config: MonkeycamConfig, json: bool) -> anyhow::Result<()> {
    let (status, _) = probe_services(&config).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("{}", render::status(&status));
    }
    Ok(())
}

fn check(config: MonkeycamConfig) -> anyhow::Result<()> {
    println!("Configuration OK");
    println!();
    print!("{}", config.to_toml_string()?);
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => interactive::run(config).await,
        Commands::Detect { day, slot, json } => detect(config, day, slot, json).await,
        Commands::Status { json } => status(config, json).await,
        Commands::Check => check(config),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run(cli))
}
